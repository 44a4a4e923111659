pub mod executor;
pub mod manager;
pub mod types;

pub use executor::RequestExecutor;
pub use manager::{RequestManager, group_requests};
pub use types::{RunOptions, RunSummary, Selector};
