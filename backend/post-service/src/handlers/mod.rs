/// HTTP handlers for post-service endpoints
///
/// - Posts: list/search with aggregates, create, fetch, update, delete
/// - Opinions: create and list per post, toggle votes
pub mod opinions;
pub mod posts;

// Re-export handler functions at module level
pub use opinions::{create_opinion, get_post_opinions, toggle_vote};
pub use posts::{create_post, delete_post, get_post, list_posts, search_posts, update_post};
