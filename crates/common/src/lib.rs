//! xplor-common - 通用类型和工具库

pub mod response;
pub mod types;
pub mod utils;

pub use response::*;
pub use types::*;
pub use utils::*;
