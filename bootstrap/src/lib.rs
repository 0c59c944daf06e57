//! xplor-bootstrap - 统一服务启动骨架
//!
//! 配置加载、日志初始化、基础设施连接（带重试）、健康检查与优雅停机

mod health;
mod infrastructure;
mod retry;
mod runtime;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use retry::*;
pub use runtime::*;
pub use starter::*;
