use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ratingmodel::Rating;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SubmitRatingDto {
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    pub score: i32,

    pub comment: Option<String>,

    /// Optional job context; a rating can exist outside any job.
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RatingResponseDto {
    pub status: String,
    pub rating: Rating,
}

#[derive(Debug, Serialize)]
pub struct RatingListResponseDto {
    pub status: String,
    pub ratings: Vec<Rating>,
    pub results: usize,
}

/// `average` is None for an unrated user; clients must render that as
/// "no rating yet", never as zero.
#[derive(Debug, Serialize)]
pub struct AverageRatingResponseDto {
    pub status: String,
    pub average: Option<f64>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_range_is_enforced() {
        let mut dto = SubmitRatingDto {
            score: 0,
            comment: None,
            job_id: None,
        };
        assert!(dto.validate().is_err());

        dto.score = 6;
        assert!(dto.validate().is_err());

        dto.score = 1;
        assert!(dto.validate().is_ok());

        dto.score = 5;
        assert!(dto.validate().is_ok());
    }
}
