//! DTO 模块
//!
//! 数据传输对象，用于 API 请求和响应的序列化。

pub mod entry_dto;
pub mod insight_dto;

pub use entry_dto::*;
pub use insight_dto::*;
