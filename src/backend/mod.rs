//! Workflow backend integration: wire types and the HTTP client that turns
//! dispatched actions into the next screen.

mod client;
mod types;

pub use client::{BackendError, WorkflowApi, WorkflowClient};
pub use types::{ActionRequest, ScreenResponse};
