//! Client-side ordering of result sets
//!
//! TMDB's search endpoint ignores sort parameters, so search results are
//! re-ordered here. Discovery results are sorted server-side and never
//! pass through this module.

use std::cmp::Ordering;

use crate::models::{Movie, SortField, SortOrder, SortSpec};

/// Compare two movies under the given sort specification.
///
/// Popularity compares numerically. Release date compares the `YYYY-MM-DD`
/// text lexicographically, so an empty date sorts first in ascending order.
/// Equal keys compare `Equal` in both directions.
pub fn compare(a: &Movie, b: &Movie, spec: SortSpec) -> Ordering {
    let ord = match spec.field {
        SortField::Popularity => a.popularity.total_cmp(&b.popularity),
        SortField::ReleaseDate => a.release_date.cmp(&b.release_date),
    };

    match spec.order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Sort a result set in place. Stable: ties keep their incoming order.
pub fn sort_movies(movies: &mut [Movie], spec: SortSpec) {
    movies.sort_by(|a, b| compare(a, b, spec));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, popularity: f64, release_date: &str) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: release_date.to_string(),
            vote_average: 6.0,
            vote_count: 10,
            popularity,
            original_language: "en".to_string(),
            genre_ids: Vec::new(),
            adult: false,
        }
    }

    fn ids(movies: &[Movie]) -> Vec<u64> {
        movies.iter().map(|m| m.id).collect()
    }

    fn sample() -> Vec<Movie> {
        vec![
            movie(1, 12.5, "1989-06-23"),
            movie(2, 98.1, "2022-03-01"),
            movie(3, 45.0, ""),
            movie(4, 3.2, "2008-07-16"),
        ]
    }

    #[test]
    fn test_popularity_desc() {
        let mut movies = sample();
        sort_movies(&mut movies, SortSpec::new(SortField::Popularity, SortOrder::Desc));
        assert_eq!(ids(&movies), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_popularity_asc() {
        let mut movies = sample();
        sort_movies(&mut movies, SortSpec::new(SortField::Popularity, SortOrder::Asc));
        assert_eq!(ids(&movies), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_release_date_empty_sorts_as_minimum() {
        let mut movies = sample();
        sort_movies(&mut movies, SortSpec::new(SortField::ReleaseDate, SortOrder::Asc));
        assert_eq!(ids(&movies), vec![3, 1, 4, 2]);

        sort_movies(&mut movies, SortSpec::new(SortField::ReleaseDate, SortOrder::Desc));
        assert_eq!(ids(&movies), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_swapping_direction_inverts_order() {
        let movies = sample();
        for field in [SortField::Popularity, SortField::ReleaseDate] {
            let asc = SortSpec::new(field, SortOrder::Asc);
            let desc = SortSpec::new(field, SortOrder::Desc);
            for a in &movies {
                for b in &movies {
                    assert_eq!(compare(a, b, asc), compare(a, b, desc).reverse());
                }
            }
        }
    }

    #[test]
    fn test_ties_are_equal_in_both_directions() {
        let a = movie(1, 10.0, "2000-01-01");
        let b = movie(2, 10.0, "2000-01-01");
        for order in [SortOrder::Asc, SortOrder::Desc] {
            for field in [SortField::Popularity, SortField::ReleaseDate] {
                assert_eq!(compare(&a, &b, SortSpec::new(field, order)), Ordering::Equal);
            }
        }
    }

    #[test]
    fn test_stable_on_ties() {
        let mut movies = vec![movie(7, 5.0, ""), movie(3, 5.0, ""), movie(9, 5.0, "")];
        sort_movies(&mut movies, SortSpec::new(SortField::Popularity, SortOrder::Desc));
        assert_eq!(ids(&movies), vec![7, 3, 9]);
    }
}
