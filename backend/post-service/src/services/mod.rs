/// Business logic layer for post-service
///
/// - Post service: post CRUD plus the aggregation layer (opinion
///   counts, impression counts, top opinion)
/// - Opinion service: opinion creation and the vote toggle
pub mod opinions;
pub mod posts;

// Re-export commonly used services
pub use opinions::OpinionService;
pub use posts::PostService;
