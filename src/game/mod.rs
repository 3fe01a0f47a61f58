pub mod api;
pub mod client;
pub mod round;
pub mod route;
pub mod store;

// Re-export commonly used items
pub use client::*;
pub use round::*;
pub use route::*;
pub use store::*;
