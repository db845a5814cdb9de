pub mod catalog;
pub mod server;
pub mod slideshow;
pub mod weather;
pub mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
