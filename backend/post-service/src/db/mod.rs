/// Database access layer
///
/// Repository modules with plain query functions over a `PgPool`.
/// All vote-table writes live in `vote_repo`; the aggregation batch
/// queries are keyed by post-id sets so a listing costs a bounded
/// number of queries regardless of how many posts it returns.
pub mod opinion_repo;
pub mod post_repo;
pub mod vote_repo;
