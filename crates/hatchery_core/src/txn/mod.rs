//! The transaction coordinator.

mod coordinator;
mod retry;

pub use coordinator::Coordinator;
pub use retry::RetryPolicy;
