//! Routes 模块
//!
//! 定义 API 路由。

pub mod entry_routes;
pub mod insight_routes;
