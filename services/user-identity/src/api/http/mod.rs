//! HTTP 接口层

pub mod extract;
pub mod handlers;
pub mod middleware;
mod router;
mod state;

pub use router::{API_PREFIX, router};
pub use state::AppState;
