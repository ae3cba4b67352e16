// Resume document model: ResumeData → section tree → paginated pages → export artifact.
// Pure and synchronous; handlers run it inside tokio::task::spawn_blocking.

pub mod document;
pub mod font_metrics;
pub mod handlers;
pub mod paginate;
pub mod render;

// Re-export the public API consumed by main, state and the profile handlers.
pub use document::build_document;
pub use font_metrics::{default_page_config, PageConfig};
pub use paginate::{paginate, PaginatedDocument};
