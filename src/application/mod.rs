// Application layer - use cases and orchestration over the in-memory directory.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
