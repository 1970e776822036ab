//! 条目 DTO
//!
//! 定义条目相关的请求和响应数据结构。

use serde::{Deserialize, Serialize};

use crate::client::DateRange;
use crate::error::Result;
use crate::insights::{HistoryItem, history};
use crate::services::EntrySnapshot;

/// 历史为空时的提示
pub const EMPTY_HISTORY_MESSAGE: &str = "No entries yet. Start journaling to see your history!";

/// 提交或修改条目请求
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntryTextRequest {
    /// 条目正文
    pub text: String,
}

/// 日期范围查询参数（`YYYY-MM-DD`）
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl HistoryQuery {
    /// 校验并转换为上游查询范围
    pub fn range(&self) -> Result<DateRange> {
        DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// 历史列表响应
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// 条目（最新在前）
    pub entries: Vec<HistoryItem>,
    /// 条目总数
    pub total: usize,
    /// 空状态提示
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<&EntrySnapshot> for HistoryResponse {
    fn from(snapshot: &EntrySnapshot) -> Self {
        let entries = history(snapshot.entries());
        Self {
            total: entries.len(),
            message: entries.is_empty().then_some(EMPTY_HISTORY_MESSAGE),
            entries,
        }
    }
}

/// 提交条目响应
#[derive(Debug, Serialize)]
pub struct SubmitEntryResponse {
    /// 新条目（含分析结果）
    pub entry: HistoryItem,
    /// 刷新后的历史
    pub history: HistoryResponse,
}
