//! TMDB API client tests
//!
//! Tests search, discovery, single-movie lookup and error handling against
//! a mocked catalog.

use std::time::{Duration, Instant};

use mockito::{Matcher, Server};
use reeltui::api::{Catalog, TmdbClient, TmdbError};
use reeltui::models::{SortField, SortOrder, SortSpec};

fn page(results: &str) -> String {
    format!(
        r#"{{"page": 1, "results": [{}], "total_pages": 1, "total_results": 3}}"#,
        results
    )
}

fn batman_results() -> String {
    page(
        r#"
        {
            "id": 268,
            "title": "Batman",
            "release_date": "1989-06-23",
            "overview": "The Dark Knight of Gotham City begins his war on crime.",
            "poster_path": "/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg",
            "backdrop_path": "/2va32apQP97gvUxaMnL5wYt4CRB.jpg",
            "vote_average": 7.2,
            "vote_count": 8000,
            "popularity": 45.1,
            "original_language": "en",
            "genre_ids": [14, 28],
            "adult": false
        },
        {
            "id": 414906,
            "title": "The Batman",
            "release_date": "2022-03-01",
            "overview": "",
            "poster_path": "/74xTEgt7R36Fpooo50r9T25onhq.jpg",
            "vote_average": 7.7,
            "vote_count": 9000,
            "popularity": 210.3,
            "original_language": "en",
            "genre_ids": [80, 9648],
            "adult": false
        },
        {
            "id": 2661,
            "title": "Batman",
            "release_date": "",
            "poster_path": null,
            "vote_average": 6.3,
            "vote_count": 700,
            "popularity": 12.0,
            "original_language": "en",
            "genre_ids": [],
            "adult": false
        }
        "#,
    )
}

fn ids(movies: &[reeltui::Movie]) -> Vec<u64> {
    movies.iter().map(|m| m.id).collect()
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_search_sends_query_and_auth() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "the batman".into()),
            Matcher::UrlEncoded("include_adult".into(), "false".into()),
            Matcher::UrlEncoded("language".into(), "en-US".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .match_header("authorization", "Bearer test_key")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(batman_results())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let results = client.search_movies("the batman", None).await.unwrap();

    mock.assert_async().await;

    // No sort spec: server order is kept
    assert_eq!(ids(&results), vec![268, 414906, 2661]);
    assert_eq!(results[0].title, "Batman");
    assert_eq!(results[0].genre_ids, vec![14, 28]);
    assert_eq!(results[2].year(), None);
    assert!(results[2].poster_path.is_none());
}

#[tokio::test]
async fn test_search_sorts_locally() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(batman_results())
        .expect(2)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());

    let by_popularity = client
        .search_movies("batman", Some(SortSpec::default()))
        .await
        .unwrap();
    assert_eq!(ids(&by_popularity), vec![414906, 268, 2661]);

    let by_date = client
        .search_movies(
            "batman",
            Some(SortSpec::new(SortField::ReleaseDate, SortOrder::Asc)),
        )
        .await
        .unwrap();
    // Empty date sorts first ascending
    assert_eq!(ids(&by_date), vec![2661, 268, 414906]);
}

#[tokio::test]
async fn test_blank_query_makes_no_request() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    assert!(client.search_movies("", None).await.unwrap().is_empty());
    assert!(client.search_movies("   \t", None).await.unwrap().is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_through_trait_object() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::UrlEncoded("query".into(), "heat".into()))
        .with_status(200)
        .with_body(page(r#"{"id": 949, "title": "Heat", "popularity": 30.0}"#))
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let catalog: &dyn Catalog = &client;
    let results = catalog.search_movies("heat", None).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Heat");
    assert_eq!(results[0].overview, "");
}

// =============================================================================
// Discover Tests
// =============================================================================

#[tokio::test]
async fn test_discover_with_decade_bounds() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/discover/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("include_adult".into(), "false".into()),
            Matcher::UrlEncoded("include_video".into(), "false".into()),
            Matcher::UrlEncoded("sort_by".into(), "popularity.desc".into()),
            Matcher::UrlEncoded("primary_release_date.gte".into(), "1980-01-01".into()),
            Matcher::UrlEncoded("primary_release_date.lte".into(), "1989-12-31".into()),
        ]))
        .with_status(200)
        .with_body(batman_results())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let results = client
        .discover_movies(None, Some("1980-01-01"), Some("1989-12-31"))
        .await
        .unwrap();

    mock.assert_async().await;
    // Discovery is ordered by the service, not re-sorted here
    assert_eq!(ids(&results), vec![268, 414906, 2661]);
}

#[tokio::test]
async fn test_discover_release_date_sort() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/discover/movie")
        .match_query(Matcher::UrlEncoded(
            "sort_by".into(),
            "primary_release_date.asc".into(),
        ))
        .with_status(200)
        .with_body(page(""))
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let sort = SortSpec::new(SortField::ReleaseDate, SortOrder::Asc);
    let results = client.discover_movies(Some(sort), None, None).await.unwrap();

    mock.assert_async().await;
    assert!(results.is_empty());
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[tokio::test]
async fn test_movie_by_id_maps_genres() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/movie/550")
        .match_query(Matcher::UrlEncoded("language".into(), "en-US".into()))
        .with_status(200)
        .with_body(
            r#"{
                "id": 550,
                "title": "Fight Club",
                "release_date": "1999-10-15",
                "overview": "A ticking-time-bomb insomniac...",
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "backdrop_path": "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
                "vote_average": 8.4,
                "vote_count": 30000,
                "popularity": 73.4,
                "original_language": "en",
                "genres": [{"id": 18, "name": "Drama"}, {"id": 53, "name": "Thriller"}],
                "adult": false,
                "runtime": 139
            }"#,
        )
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let movie = client.movie_by_id(550).await.unwrap();

    assert_eq!(movie.title, "Fight Club");
    assert_eq!(movie.year(), Some(1999));
    assert_eq!(movie.genre_ids, vec![18, 53]);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[tokio::test]
async fn test_not_found() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/movie/999999999")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"success": false, "status_code": 34}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.movie_by_id(999999999).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::NotFound)
    ));
}

#[tokio::test]
async fn test_unauthorized() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("", server.url());
    let err = client.search_movies("batman", None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/discover/movie")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.discover_movies(None, None, None).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::ServerError(503))
    ));
}

#[tokio::test]
async fn test_malformed_body() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.search_movies("batman", None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    // Accepts connections but never answers
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let client = TmdbClient::with_options("test_key", url, Duration::from_millis(200)).unwrap();
    let started = Instant::now();
    let err = client.movie_by_id(1).await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(5));
    match err.downcast_ref::<TmdbError>() {
        Some(TmdbError::RequestFailed(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
    drop(listener);
}

#[tokio::test]
async fn test_connection_refused_is_request_failure() {
    // Nothing listens on the discard port
    let client = TmdbClient::with_base_url("test_key", "http://127.0.0.1:9");
    let err = client.movie_by_id(1).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::RequestFailed(_))
    ));
}
