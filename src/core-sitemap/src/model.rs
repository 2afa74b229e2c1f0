//! Sitemap entries and the metadata attached to them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SitemapError;

/// How frequently a page is likely to change, as defined by the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// The protocol name, as written into `<changefreq>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = SitemapError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(SitemapError::InvalidChangeFrequency(s.to_string())),
        }
    }
}

/// One `<url>` record of the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    /// Absolute URL of the page
    pub url: String,
    /// Optional ISO-8601 last modification date
    pub lastmod: Option<String>,
    /// Optional change frequency hint
    pub changefreq: Option<ChangeFrequency>,
    /// Optional priority in [0, 1]
    pub priority: Option<f64>,
}

impl SitemapEntry {
    /// An entry with only a location.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

/// Partial entry used to override configuration defaults for a single route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteOverride {
    #[serde(default)]
    pub changefreq: Option<ChangeFrequency>,
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default)]
    pub lastmod: Option<String>,
}

/// Renders a timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn iso8601(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
