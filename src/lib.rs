//! MindMirror - 日记洞察网关
//!
//! 为 MindMirror 仪表盘代理日记服务与反思服务，并在网关侧完成
//! 情绪均值、关注点频次、心情分档与日期排序等聚合计算。

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
