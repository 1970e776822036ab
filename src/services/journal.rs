//! 日记服务
//!
//! 转发条目的增删改查，并在每次变更后重新拉取完整历史，
//! 调用方拿到的始终是一份整体替换的快照。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::client::{DateRange, JournalApi, validate_entry_id};
use crate::error::{AppError, Result};
use crate::insights;
use crate::models::{JournalEntry, MoodDataPoint};
use crate::security::Session;

/// 历史条目快照
///
/// 不可变，变更后整体替换，从不局部修改。
#[derive(Debug, Clone)]
pub struct EntrySnapshot {
    entries: Arc<[JournalEntry]>,
    fetched_at: DateTime<Utc>,
}

impl EntrySnapshot {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        Self {
            entries: entries.into(),
            fetched_at: Utc::now(),
        }
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 最新条目
    pub fn latest(&self) -> Option<&JournalEntry> {
        insights::latest_entry(&self.entries)
    }
}

/// 日记服务 trait
#[async_trait]
pub trait JournalService: Send + Sync {
    /// 拉取历史快照
    async fn snapshot(&self, session: &Session, range: &DateRange) -> Result<EntrySnapshot>;

    /// 获取单个条目
    async fn entry(&self, session: &Session, id: &str) -> Result<JournalEntry>;

    /// 提交新条目，返回新条目与刷新后的快照
    async fn submit(&self, session: &Session, text: &str) -> Result<(JournalEntry, EntrySnapshot)>;

    /// 修改条目，返回刷新后的快照
    async fn edit(&self, session: &Session, id: &str, text: &str) -> Result<EntrySnapshot>;

    /// 删除条目，返回刷新后的快照
    async fn remove(&self, session: &Session, id: &str) -> Result<EntrySnapshot>;

    /// 心情趋势（按日期升序）
    async fn mood_trend(&self, session: &Session, range: &DateRange) -> Result<Vec<MoodDataPoint>>;
}

/// 日记服务实现
pub struct JournalServiceImpl {
    api: Arc<dyn JournalApi>,
}

impl JournalServiceImpl {
    /// 创建新的服务实例
    pub fn new(api: Arc<dyn JournalApi>) -> Self {
        Self { api }
    }

    async fn refresh(&self, session: &Session) -> Result<EntrySnapshot> {
        self.snapshot(session, &DateRange::default()).await
    }
}

/// 校验条目文本非空
fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Journal entry cannot be empty.".to_string()));
    }
    Ok(())
}

fn validate_id(id: &str) -> Result<()> {
    validate_entry_id(id)
}

#[async_trait]
impl JournalService for JournalServiceImpl {
    async fn snapshot(&self, session: &Session, range: &DateRange) -> Result<EntrySnapshot> {
        let entries = session.guard(self.api.history(session, range).await)?;
        debug!("Fetched {} journal entries", entries.len());
        Ok(EntrySnapshot::new(entries))
    }

    async fn entry(&self, session: &Session, id: &str) -> Result<JournalEntry> {
        validate_id(id)?;
        session.guard(self.api.get_entry(session, id).await)
    }

    async fn submit(&self, session: &Session, text: &str) -> Result<(JournalEntry, EntrySnapshot)> {
        validate_text(text)?;

        let entry = session.guard(self.api.create_entry(session, text).await)?;
        info!(
            "Journal entry {} saved (analyzed: {})",
            entry.id,
            entry.is_analyzed()
        );

        let snapshot = self.refresh(session).await?;
        Ok((entry, snapshot))
    }

    async fn edit(&self, session: &Session, id: &str, text: &str) -> Result<EntrySnapshot> {
        validate_id(id)?;
        validate_text(text)?;

        session.guard(self.api.update_entry(session, id, text).await)?;
        info!("Journal entry {} updated", id);

        self.refresh(session).await
    }

    async fn remove(&self, session: &Session, id: &str) -> Result<EntrySnapshot> {
        validate_id(id)?;

        session.guard(self.api.delete_entry(session, id).await)?;
        info!("Journal entry {} deleted", id);

        self.refresh(session).await
    }

    async fn mood_trend(&self, session: &Session, range: &DateRange) -> Result<Vec<MoodDataPoint>> {
        let points = session.guard(self.api.mood_data(session, range).await)?;
        Ok(insights::mood_trend(points))
    }
}

/// 创建日记服务
pub fn create_journal_service(api: Arc<dyn JournalApi>) -> Box<dyn JournalService> {
    Box::new(JournalServiceImpl::new(api))
}
