use serde::Deserialize;

use crate::entities::movie;

/// New row for the store; rating and review are assigned by the store
/// itself (every entry starts unrated).
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub image_url: String,
}

/// A catalog entry paired with its position in the rating order, where
/// rank 1 is the best-rated entry. Computed per response, never stored.
#[derive(Clone, Debug)]
pub struct RankedMovie {
    pub rank: usize,
    pub movie: movie::Model,
}

/// `movies` must be sorted ascending by rating, as the store returns
/// them.
pub fn assign_ranks(movies: Vec<movie::Model>) -> Vec<RankedMovie> {
    let total = movies.len();
    movies
        .into_iter()
        .enumerate()
        .map(|(position, movie)| RankedMovie { rank: total - position, movie })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub new_rating: String,
    #[serde(default)]
    pub new_review: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct EditErrors {
    pub rating: Option<&'static str>,
    pub review: Option<&'static str>,
}

impl EditForm {
    /// Pre-fills the form with an entry's current values for the GET
    /// side of the edit flow.
    pub fn prefill(movie: &movie::Model) -> Self {
        Self { new_rating: movie.rating.to_string(), new_review: movie.review.clone() }
    }

    pub fn validate(&self) -> Result<(f64, String), EditErrors> {
        let mut errors = EditErrors::default();

        let rating = match self.new_rating.trim() {
            "" => {
                errors.rating = Some("A rating is required");
                None
            },
            raw => match raw.parse::<f64>() {
                Ok(value) if (0.0..=10.0).contains(&value) => Some(value),
                Ok(_) => {
                    errors.rating = Some("Rating must be between 0 and 10");
                    None
                },
                Err(_) => {
                    errors.rating = Some("Rating must be a number");
                    None
                },
            },
        };

        let review = self.new_review.trim();
        if review.is_empty() {
            errors.review = Some("A review is required");
        }

        match (rating, errors.review) {
            (Some(rating), None) => Ok((rating, review.to_string())),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
}

impl AddForm {
    pub fn validate(&self) -> Result<String, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("A title is required");
        }
        Ok(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i32, title: &str, rating: f64) -> movie::Model {
        movie::Model {
            id,
            title: title.to_string(),
            year: 1999,
            description: String::new(),
            rating,
            review: "None".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn ranks_cover_one_to_n_with_best_rated_first() {
        let ranked = assign_ranks(vec![
            entry(1, "Low", 2.0),
            entry(2, "Mid", 5.5),
            entry(3, "High", 9.9),
        ]);

        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [3, 2, 1]);
        assert_eq!(ranked[2].movie.title, "High");
        assert_eq!(ranked[2].rank, 1);
    }

    #[test]
    fn ranking_an_empty_catalog_is_empty() {
        assert!(assign_ranks(Vec::new()).is_empty());
    }

    #[test]
    fn edit_form_accepts_in_range_rating() {
        let form = EditForm { new_rating: "7.5".into(), new_review: "solid".into() };
        assert_eq!(form.validate().unwrap(), (7.5, "solid".to_string()));
    }

    #[test]
    fn edit_form_rejects_out_of_range_rating() {
        for raw in ["10.5", "-1", "11"] {
            let form = EditForm { new_rating: raw.into(), new_review: "ok".into() };
            let errors = form.validate().unwrap_err();
            assert!(errors.rating.is_some(), "{raw} should be rejected");
            assert!(errors.review.is_none());
        }
    }

    #[test]
    fn edit_form_rejects_non_numeric_rating() {
        let form = EditForm { new_rating: "ten".into(), new_review: "ok".into() };
        assert!(form.validate().unwrap_err().rating.is_some());
    }

    #[test]
    fn edit_form_requires_both_fields() {
        let errors = EditForm::default().validate().unwrap_err();
        assert!(errors.rating.is_some());
        assert!(errors.review.is_some());
    }

    #[test]
    fn edit_form_boundaries_are_inclusive() {
        for raw in ["0", "10"] {
            let form = EditForm { new_rating: raw.into(), new_review: "ok".into() };
            assert!(form.validate().is_ok(), "{raw} should be accepted");
        }
    }

    #[test]
    fn add_form_requires_a_title() {
        assert!(AddForm { title: "  ".into() }.validate().is_err());
        assert_eq!(AddForm { title: " Inception ".into() }.validate().unwrap(), "Inception");
    }
}
