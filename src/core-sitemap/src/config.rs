//! Configuration options for sitemap generation.

use std::{collections::HashMap, fmt, sync::Arc};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    errors::{Result, SitemapError},
    exclude::ExcludeMatcher,
    manual::ManualRoutesProvider,
    model::{ChangeFrequency, RouteOverride, iso8601},
};

/// Default change frequency applied to every entry without its own.
pub const DEFAULT_CHANGEFREQ: ChangeFrequency = ChangeFrequency::Weekly;

/// Default priority applied to every entry without its own.
pub const DEFAULT_PRIORITY: f64 = 0.5;

/// Validated, immutable configuration for the generator.
///
/// Built with [`GeneratorConfig::builder`]; never mutated afterwards, so one
/// instance can serve any number of concurrent generation runs.
#[derive(Clone)]
pub struct GeneratorConfig {
    base_url: String,
    default_changefreq: Option<ChangeFrequency>,
    default_priority: Option<f64>,
    excludes: ExcludeMatcher,
    route_options: HashMap<String, RouteOverride>,
    trailing_slash: bool,
    lastmod: Option<String>,
    pretty_print: bool,
    manual_routes: Option<Arc<dyn ManualRoutesProvider>>,
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("base_url", &self.base_url)
            .field("default_changefreq", &self.default_changefreq)
            .field("default_priority", &self.default_priority)
            .field("excludes", &self.excludes)
            .field("route_options", &self.route_options)
            .field("trailing_slash", &self.trailing_slash)
            .field("lastmod", &self.lastmod)
            .field("pretty_print", &self.pretty_print)
            .field("manual_routes", &self.manual_routes.is_some())
            .finish()
    }
}

impl GeneratorConfig {
    /// Creates a new builder for GeneratorConfig.
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// The base URL with any single trailing `/` removed.
    pub fn base_url(&self) -> &str {
        self.base_url.strip_suffix('/').unwrap_or(&self.base_url)
    }

    pub fn default_changefreq(&self) -> Option<ChangeFrequency> {
        self.default_changefreq
    }

    pub fn default_priority(&self) -> Option<f64> {
        self.default_priority
    }

    pub fn excludes(&self) -> &ExcludeMatcher {
        &self.excludes
    }

    /// The per-route override for an absolute path, if one was configured.
    pub fn route_override(&self, path: &str) -> Option<&RouteOverride> {
        self.route_options.get(path)
    }

    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    pub fn lastmod(&self) -> Option<&str> {
        self.lastmod.as_deref()
    }

    pub fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    pub fn manual_routes(&self) -> Option<&dyn ManualRoutesProvider> {
        self.manual_routes.as_deref()
    }
}

/// How the default `lastmod` is chosen.
#[derive(Debug, Clone)]
enum LastmodSetting {
    /// Wall clock at build time
    Now,
    At(DateTime<Utc>),
    Fixed(String),
    Omit,
}

/// Builder for GeneratorConfig.
#[derive(Clone)]
pub struct GeneratorConfigBuilder {
    base_url: Option<String>,
    default_changefreq: Option<ChangeFrequency>,
    default_priority: Option<f64>,
    exclude_routes: Vec<String>,
    route_options: HashMap<String, RouteOverride>,
    trailing_slash: bool,
    lastmod: LastmodSetting,
    pretty_print: bool,
    manual_routes: Option<Arc<dyn ManualRoutesProvider>>,
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            default_changefreq: Some(DEFAULT_CHANGEFREQ),
            default_priority: Some(DEFAULT_PRIORITY),
            exclude_routes: Vec::new(),
            route_options: HashMap::new(),
            trailing_slash: false,
            lastmod: LastmodSetting::Now,
            pretty_print: true,
            manual_routes: None,
        }
    }
}

impl GeneratorConfigBuilder {
    /// Sets the site's base URL, e.g. `https://example.com`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the base URL only if none was set yet.
    pub fn or_base_url(mut self, base_url: impl Into<String>) -> Self {
        if self.base_url.is_none() {
            self.base_url = Some(base_url.into());
        }
        self
    }

    pub fn default_changefreq(mut self, changefreq: ChangeFrequency) -> Self {
        self.default_changefreq = Some(changefreq);
        self
    }

    /// Entries without their own change frequency get none.
    pub fn omit_default_changefreq(mut self) -> Self {
        self.default_changefreq = None;
        self
    }

    pub fn default_priority(mut self, priority: f64) -> Self {
        self.default_priority = Some(priority);
        self
    }

    /// Entries without their own priority get none.
    pub fn omit_default_priority(mut self) -> Self {
        self.default_priority = None;
        self
    }

    /// Adds a path pattern to exclude.
    pub fn exclude_route(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_routes.push(pattern.into());
        self
    }

    /// Adds multiple path patterns to exclude.
    pub fn exclude_routes(mut self, patterns: Vec<String>) -> Self {
        self.exclude_routes.extend(patterns);
        self
    }

    /// Overrides defaults for the route at an absolute path.
    pub fn route_option(mut self, path: impl Into<String>, options: RouteOverride) -> Self {
        self.route_options.insert(path.into(), options);
        self
    }

    pub fn route_options(mut self, options: HashMap<String, RouteOverride>) -> Self {
        self.route_options.extend(options);
        self
    }

    pub fn trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    /// Uses a fixed string as the default `lastmod`.
    pub fn lastmod(mut self, lastmod: impl Into<String>) -> Self {
        self.lastmod = LastmodSetting::Fixed(lastmod.into());
        self
    }

    /// Uses the given instant, rendered as ISO-8601, as the default `lastmod`.
    pub fn lastmod_at(mut self, now: DateTime<Utc>) -> Self {
        self.lastmod = LastmodSetting::At(now);
        self
    }

    /// Entries without their own `lastmod` get none.
    pub fn omit_lastmod(mut self) -> Self {
        self.lastmod = LastmodSetting::Omit;
        self
    }

    pub fn pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    /// Sets the source of manual entries.
    pub fn manual_routes<P: ManualRoutesProvider + 'static>(mut self, provider: P) -> Self {
        self.manual_routes = Some(Arc::new(provider));
        self
    }

    /// Validates and builds the GeneratorConfig.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the base URL is missing or blank
    /// - the default priority or any route option priority lies outside [0, 1]
    /// - an exclusion pattern cannot be compiled
    pub fn build(self) -> Result<GeneratorConfig> {
        let base_url = match self.base_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => return Err(SitemapError::MissingBaseUrl),
        };

        if let Some(priority) = self.default_priority {
            check_priority(priority)?;
        }
        for options in self.route_options.values() {
            if let Some(priority) = options.priority {
                check_priority(priority)?;
            }
        }

        let excludes = ExcludeMatcher::new(&self.exclude_routes)?;

        let lastmod = match self.lastmod {
            LastmodSetting::Now => Some(iso8601(&Utc::now())),
            LastmodSetting::At(now) => Some(iso8601(&now)),
            LastmodSetting::Fixed(lastmod) => Some(lastmod),
            LastmodSetting::Omit => None,
        };

        Ok(GeneratorConfig {
            base_url,
            default_changefreq: self.default_changefreq,
            default_priority: self.default_priority,
            excludes,
            route_options: self.route_options,
            trailing_slash: self.trailing_slash,
            lastmod,
            pretty_print: self.pretty_print,
            manual_routes: self.manual_routes,
        })
    }
}

fn check_priority(priority: f64) -> Result<()> {
    if (0.0..=1.0).contains(&priority) {
        Ok(())
    } else {
        Err(SitemapError::InvalidPriority(priority))
    }
}

/// On-disk JSON configuration, keyed the way router build plugins name their options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub default_changefreq: Option<ChangeFrequency>,
    #[serde(default)]
    pub default_priority: Option<f64>,
    #[serde(default)]
    pub exclude_routes: Vec<String>,
    #[serde(default)]
    pub route_options: HashMap<String, RouteOverride>,
    #[serde(default)]
    pub trailing_slash: Option<bool>,
    #[serde(default)]
    pub lastmod: Option<String>,
    #[serde(default)]
    pub pretty_print: Option<bool>,
}

impl ConfigFile {
    /// Parses the JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&content)
    }

    /// Seeds a builder with every setting present in the file.
    pub fn into_builder(self) -> GeneratorConfigBuilder {
        let mut builder = GeneratorConfig::builder()
            .exclude_routes(self.exclude_routes)
            .route_options(self.route_options);
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(changefreq) = self.default_changefreq {
            builder = builder.default_changefreq(changefreq);
        }
        if let Some(priority) = self.default_priority {
            builder = builder.default_priority(priority);
        }
        if let Some(trailing_slash) = self.trailing_slash {
            builder = builder.trailing_slash(trailing_slash);
        }
        if let Some(lastmod) = self.lastmod {
            builder = builder.lastmod(lastmod);
        }
        if let Some(pretty_print) = self.pretty_print {
            builder = builder.pretty_print(pretty_print);
        }
        builder
    }
}
