pub mod require_review_key;

pub use require_review_key::RequireReviewKey;
