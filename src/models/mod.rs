//! 核心数据模型模块
//!
//! 定义日记条目与心情趋势数据点。

pub mod journal_entry;

pub use journal_entry::*;
