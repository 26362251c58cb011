use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labelbase_core::DocumentId;

/// Summarized review text and count for one rating bucket (1-5 stars).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub summarized_review: String,
    pub review_rating_count: u64,
}

/// Aggregated review data for a product.
///
/// One-to-one with a product via a unique reference. Read-only join target:
/// no in-scope handler creates or mutates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReview {
    pub id: DocumentId,
    pub product_id: DocumentId,
    /// Buckets for ratings 1..=5, index 0 holding the 1-star bucket.
    pub reviews: [RatingSummary; 5],
    pub total_reviews: u64,
    /// Bounded to 0.0..=5.0.
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductReview {
    pub fn new(product_id: DocumentId, reviews: [RatingSummary; 5]) -> Self {
        let total_reviews: u64 = reviews.iter().map(|r| r.review_rating_count).sum();
        let weighted: u64 = reviews
            .iter()
            .enumerate()
            .map(|(i, r)| (i as u64 + 1) * r.review_rating_count)
            .sum();
        let average_rating = if total_reviews == 0 {
            0.0
        } else {
            (weighted as f64 / total_reviews as f64).clamp(0.0, 5.0)
        };

        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            product_id,
            reviews,
            total_reviews,
            average_rating,
            created_at: now,
            updated_at: now,
        }
    }
}
