use crate::transition::ValueError;
use serde::{Deserialize, Serialize};

/// Validates a 1-5 star rating
pub fn check_rating(rating: i32) -> Result<i32, ValueError> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(ValueError::Rating(rating))
    }
}

/// Same as [`check_rating`] for the optional sub-ratings
pub fn check_optional_rating(rating: Option<i32>) -> Result<Option<i32>, ValueError> {
    rating.map(check_rating).transpose()
}

/// Aggregate stored on a mentor profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// `None` when the mentor has no reviews. Never zero-filled
    pub average: Option<f64>,
    pub count: i32,
}

impl RatingSummary {
    pub const EMPTY: Self = Self {
        average: None,
        count: 0,
    };

    /// Recomputes the aggregate from every rating, not incrementally
    pub fn from_ratings(ratings: &[i32]) -> Self {
        if ratings.is_empty() {
            return Self::EMPTY;
        }

        let total: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
        let count = ratings.len();

        Self {
            average: Some(total as f64 / count as f64),
            count: count as i32,
        }
    }
}
