//! xplor-ports - 抽象 trait 层
//!
//! 服务只依赖这些接口，具体实现在 adapters 中

mod cache;
mod sms;

pub use cache::*;
pub use sms::*;
