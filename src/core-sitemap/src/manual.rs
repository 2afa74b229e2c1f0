//! Manual routes: sitemap entries for content the route tree cannot describe.

use std::{future::Future, path::PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    errors::{Result, SitemapError},
    model::{ChangeFrequency, iso8601},
};

/// When a manually supplied page was last modified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LastModified {
    /// Rendered as ISO-8601 on output.
    Timestamp(DateTime<Utc>),
    /// Passed through to the output unchanged.
    Text(String),
}

impl LastModified {
    pub fn to_lastmod(&self) -> String {
        match self {
            Self::Timestamp(ts) => iso8601(ts),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<String> for LastModified {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for LastModified {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<DateTime<Utc>> for LastModified {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

/// A sitemap entry supplied directly by the caller, e.g. for database-backed pages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntry {
    /// Path (or absolute URL) of the page
    pub location: String,
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default)]
    pub last_modified: Option<LastModified>,
    #[serde(default)]
    pub change_frequency: Option<ChangeFrequency>,
}

impl ManualEntry {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            priority: None,
            last_modified: None,
            change_frequency: None,
        }
    }

    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn last_modified(mut self, last_modified: impl Into<LastModified>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    pub fn change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(change_frequency);
        self
    }
}

/// Source of manual entries, consulted exactly once per generation run.
#[async_trait]
pub trait ManualRoutesProvider: Send + Sync {
    async fn manual_routes(&self) -> Result<Vec<ManualEntry>>;
}

/// A fixed list of entries.
#[async_trait]
impl ManualRoutesProvider for Vec<ManualEntry> {
    async fn manual_routes(&self) -> Result<Vec<ManualEntry>> {
        Ok(self.clone())
    }
}

/// Adapts a synchronous closure into a provider.
pub struct SyncFnManualRoutes<F>(pub F);

#[async_trait]
impl<F> ManualRoutesProvider for SyncFnManualRoutes<F>
where
    F: Fn() -> Result<Vec<ManualEntry>> + Send + Sync,
{
    async fn manual_routes(&self) -> Result<Vec<ManualEntry>> {
        (self.0)()
    }
}

/// Adapts a closure returning a future into a provider, e.g. one that queries a database.
///
/// # Examples
///
/// ```
/// # use core_sitemap::{FnManualRoutes, ManualEntry, ManualRoutesProvider};
/// # #[tokio::main]
/// # async fn main() {
/// let provider = FnManualRoutes(|| async {
///     let slugs = vec!["hello-world", "second-post"];
///     Ok::<_, core_sitemap::SitemapError>(slugs.into_iter().map(|s| ManualEntry::new(format!("/blog/{s}"))).collect())
/// });
/// let entries = provider.manual_routes().await.unwrap();
/// assert_eq!(entries[0].location, "/blog/hello-world");
/// # }
/// ```
pub struct FnManualRoutes<F>(pub F);

#[async_trait]
impl<F, Fut> ManualRoutesProvider for FnManualRoutes<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<ManualEntry>>> + Send,
{
    async fn manual_routes(&self) -> Result<Vec<ManualEntry>> {
        (self.0)().await
    }
}

/// Reads a JSON array of manual entries from disk on every run.
#[derive(Debug, Clone)]
pub struct JsonFileManualRoutes {
    path: PathBuf,
}

impl JsonFileManualRoutes {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ManualRoutesProvider for JsonFileManualRoutes {
    async fn manual_routes(&self) -> Result<Vec<ManualEntry>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SitemapError::ManualRoutes(format!("cannot read {}: {}", self.path.display(), e)))?;
        let entries: Vec<ManualEntry> = serde_json::from_str(&content)?;
        tracing::debug!("Read {} manual entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_last_modified_to_lastmod() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(LastModified::from(ts).to_lastmod(), "2024-03-01T12:00:00.000Z");
        assert_eq!(LastModified::from("2024-03-01").to_lastmod(), "2024-03-01");
    }

    #[test]
    fn test_deserialize_manual_entry() {
        let json = r#"{
            "location": "/blog/post-1",
            "priority": 0.7,
            "lastModified": "2024-02-02T00:00:00Z",
            "changeFrequency": "monthly"
        }"#;
        let entry: ManualEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.location, "/blog/post-1");
        assert_eq!(entry.priority, Some(0.7));
        assert_eq!(
            entry.last_modified,
            Some(LastModified::Text("2024-02-02T00:00:00Z".to_string()))
        );
        assert_eq!(entry.change_frequency, Some(ChangeFrequency::Monthly));

        let minimal: ManualEntry = serde_json::from_str(r#"{ "location": "/x" }"#).unwrap();
        assert_eq!(minimal, ManualEntry::new("/x"));
    }

    #[tokio::test]
    async fn test_vec_provider() {
        let provider = vec![ManualEntry::new("/a"), ManualEntry::new("/b")];
        let entries = provider.manual_routes().await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_sync_fn_provider() {
        let provider = SyncFnManualRoutes(|| Ok::<_, SitemapError>(vec![ManualEntry::new("/sync")]));
        assert_eq!(provider.manual_routes().await.unwrap()[0].location, "/sync");

        let failing = SyncFnManualRoutes(|| Err::<Vec<ManualEntry>, _>(SitemapError::ManualRoutes("boom".to_string())));
        assert!(failing.manual_routes().await.is_err());
    }

    #[tokio::test]
    async fn test_async_fn_provider() {
        let provider = FnManualRoutes(|| async {
            tokio::task::yield_now().await;
            Ok::<_, SitemapError>(vec![ManualEntry::new("/later").priority(0.3)])
        });
        let entries = provider.manual_routes().await.unwrap();
        assert_eq!(entries, vec![ManualEntry::new("/later").priority(0.3)]);
    }

    #[tokio::test]
    async fn test_json_file_provider() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "location": "/products/1" }}, {{ "location": "/products/2", "priority": 0.9 }}]"#
        )
        .unwrap();

        let provider = JsonFileManualRoutes::new(file.path());
        let entries = provider.manual_routes().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].priority, Some(0.9));
    }

    #[tokio::test]
    async fn test_json_file_provider_missing_file() {
        let provider = JsonFileManualRoutes::new("/definitely/not/here.json");
        let result = provider.manual_routes().await;
        assert!(matches!(result, Err(SitemapError::ManualRoutes(_))));
    }
}
