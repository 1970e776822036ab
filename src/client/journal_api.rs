//! 日记服务客户端

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::client::{ensure_success, normalize_base_url};
use crate::config::config::JournalApiConfig;
use crate::error::{AppError, Result};
use crate::models::{JournalEntry, MoodDataPoint};
use crate::security::Session;

const SERVICE: &str = "journal API";

/// 查询日期范围，缺省时由上游决定（默认最近 30 天）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// 从 `YYYY-MM-DD` 查询参数解析
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let range = Self {
            start: start.map(parse_date).transpose()?,
            end: end.map(parse_date).transpose()?,
        };

        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(AppError::Validation(format!(
                    "startDate {} is after endDate {}",
                    start, end
                )));
            }
        }

        Ok(range)
    }

    /// 上游查询参数
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start {
            query.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            query.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        query
    }
}

/// 校验条目 ID 可以作为单个路径段转发
///
/// 拒绝空白、`.`/`..` 以及含有分隔符或百分号的 ID，避免改写上游路径。
pub fn validate_entry_id(id: &str) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::Validation("Entry id is required".to_string()));
    }
    if id == "." || id == ".." || id.contains(['/', '\\', '?', '#', '%']) {
        return Err(AppError::Validation(format!("Invalid entry id '{}'", id)));
    }
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// 日记服务 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalApi: Send + Sync {
    /// 提交新条目（上游完成分析后返回）
    async fn create_entry(&self, session: &Session, text: &str) -> Result<JournalEntry>;

    /// 修改条目文本（上游重新分析）
    async fn update_entry(&self, session: &Session, id: &str, text: &str) -> Result<JournalEntry>;

    /// 删除条目
    async fn delete_entry(&self, session: &Session, id: &str) -> Result<()>;

    /// 获取单个条目
    async fn get_entry(&self, session: &Session, id: &str) -> Result<JournalEntry>;

    /// 获取历史条目
    async fn history(&self, session: &Session, range: &DateRange) -> Result<Vec<JournalEntry>>;

    /// 获取心情趋势数据
    async fn mood_data(&self, session: &Session, range: &DateRange) -> Result<Vec<MoodDataPoint>>;
}

#[derive(Serialize)]
struct EntryTextRequest<'a> {
    text: &'a str,
}

/// 基于 reqwest 的日记服务客户端
pub struct HttpJournalApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJournalApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn from_config(config: &JournalApiConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs.max(1)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/journal{}", self.base_url, path)
    }

    /// `{base}/api/journal/{id}`，ID 作为转义后的单个路径段
    fn entry_url(&self, id: &str) -> Result<Url> {
        validate_entry_id(id)?;

        let mut url = Url::parse(&self.url(""))
            .map_err(|e| AppError::Config(format!("Invalid journal API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("Journal API URL cannot take a path: {}", self.base_url)))?
            .push(id.trim());
        Ok(url)
    }
}

#[async_trait]
impl JournalApi for HttpJournalApi {
    async fn create_entry(&self, session: &Session, text: &str) -> Result<JournalEntry> {
        debug!("POST {}", self.url(""));
        let response = self
            .client
            .post(self.url(""))
            .bearer_auth(session.bearer()?)
            .json(&EntryTextRequest { text })
            .send()
            .await?;

        let entry = ensure_success(SERVICE, response).await?.json().await?;
        Ok(entry)
    }

    async fn update_entry(&self, session: &Session, id: &str, text: &str) -> Result<JournalEntry> {
        let url = self.entry_url(id)?;
        debug!("PUT {}", url);
        let response = self
            .client
            .put(url)
            .bearer_auth(session.bearer()?)
            .json(&EntryTextRequest { text })
            .send()
            .await?;

        let entry = ensure_success(SERVICE, response).await?.json().await?;
        Ok(entry)
    }

    async fn delete_entry(&self, session: &Session, id: &str) -> Result<()> {
        let url = self.entry_url(id)?;
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .bearer_auth(session.bearer()?)
            .send()
            .await?;

        ensure_success(SERVICE, response).await?;
        Ok(())
    }

    async fn get_entry(&self, session: &Session, id: &str) -> Result<JournalEntry> {
        let url = self.entry_url(id)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(session.bearer()?)
            .send()
            .await?;

        let entry = ensure_success(SERVICE, response).await?.json().await?;
        Ok(entry)
    }

    async fn history(&self, session: &Session, range: &DateRange) -> Result<Vec<JournalEntry>> {
        let response = self
            .client
            .get(self.url("/history"))
            .bearer_auth(session.bearer()?)
            .query(&range.query())
            .send()
            .await?;

        // 上游在无数据时可能返回 null
        let entries: Option<Vec<JournalEntry>> =
            ensure_success(SERVICE, response).await?.json().await?;
        Ok(entries.unwrap_or_default())
    }

    async fn mood_data(&self, session: &Session, range: &DateRange) -> Result<Vec<MoodDataPoint>> {
        let response = self
            .client
            .get(self.url("/mood-data"))
            .bearer_auth(session.bearer()?)
            .query(&range.query())
            .send()
            .await?;

        let points: Option<Vec<MoodDataPoint>> =
            ensure_success(SERVICE, response).await?.json().await?;
        Ok(points.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_parse() {
        let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(
            range.query(),
            vec![
                ("startDate", "2024-01-01".to_string()),
                ("endDate", "2024-01-31".to_string())
            ]
        );
        assert!(DateRange::parse(None, None).unwrap().query().is_empty());
    }

    #[test]
    fn test_date_range_rejects_bad_input() {
        assert!(DateRange::parse(Some("01/02/2024"), None).is_err());
        assert!(DateRange::parse(Some("2024-02-10"), Some("2024-02-01")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let api = HttpJournalApi::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.url("/history"), "http://localhost:8080/api/journal/history");
        assert_eq!(
            api.entry_url("42").unwrap().as_str(),
            "http://localhost:8080/api/journal/42"
        );
    }

    #[test]
    fn test_entry_id_cannot_escape_its_segment() {
        let api = HttpJournalApi::new("http://localhost:8080", Duration::from_secs(5)).unwrap();
        for id in ["../../admin?x=1", "..", ".", "a/b", "a#b", "%2e%2e", "a\\b", "  "] {
            assert!(
                matches!(api.entry_url(id), Err(AppError::Validation(_))),
                "id {:?} should be rejected",
                id
            );
        }
        assert!(validate_entry_id("entry-7").is_ok());
        assert!(validate_entry_id("2024.01.02").is_ok());
    }
}
