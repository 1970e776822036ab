//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod entry_handler;
pub mod insight_handler;

pub use entry_handler::*;
pub use insight_handler::*;
