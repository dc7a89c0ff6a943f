pub mod cache;
pub mod client;
pub mod loader;
pub mod types;
