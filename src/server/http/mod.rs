pub mod handlers;
pub mod server;
pub mod templates;

// Re-export commonly used types
pub use handlers::{AppState, SlideshowStatus};
pub use server::{router, serve, STATIC_PREFIX};
pub use templates::Templates;
