//! Turning route descriptors and manual entries into sitemap entries.

use std::collections::HashSet;

use crate::{
    config::GeneratorConfig,
    flatten::RouteDescriptor,
    manual::ManualEntry,
    model::SitemapEntry,
};

/// Resolves flattened routes into entries, keeping the first occurrence of every path.
///
/// Per-route options win over configuration defaults, field by field.
pub fn resolve_routes(descriptors: &[RouteDescriptor], config: &GeneratorConfig) -> Vec<SitemapEntry> {
    let mut seen = HashSet::new();
    let entries: Vec<SitemapEntry> = descriptors
        .iter()
        .filter(|d| seen.insert(d.full_path.as_str()))
        .map(|d| {
            let overrides = d.overrides.as_ref();
            SitemapEntry {
                url: build_url(config, &d.full_path),
                lastmod: overrides
                    .and_then(|o| o.lastmod.clone())
                    .or_else(|| config.lastmod().map(str::to_string)),
                changefreq: overrides
                    .and_then(|o| o.changefreq)
                    .or(config.default_changefreq()),
                priority: overrides.and_then(|o| o.priority).or(config.default_priority()),
            }
        })
        .collect();

    let duplicates = descriptors.len() - entries.len();
    if duplicates > 0 {
        tracing::debug!("Dropped {} duplicate routes", duplicates);
    }
    entries
}

/// Fetches the configured manual entries and resolves them.
///
/// The provider is awaited exactly once. If it fails, the failure is logged and
/// no manual entries are produced; generation carries on without them.
pub async fn resolve_manual(config: &GeneratorConfig) -> Vec<SitemapEntry> {
    let Some(provider) = config.manual_routes() else {
        return Vec::new();
    };

    let manual_entries = match provider.manual_routes().await {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!("Failed to load manual routes, continuing without them: {}", error);
            return Vec::new();
        }
    };

    let entries: Vec<SitemapEntry> = manual_entries
        .iter()
        .filter(|entry| {
            let excluded = config.excludes().is_excluded(&entry.location);
            if excluded {
                tracing::debug!("Skipping excluded manual route: {}", entry.location);
            }
            !excluded
        })
        .map(|entry| resolve_manual_entry(entry, config))
        .collect();

    tracing::debug!("Resolved {} of {} manual routes", entries.len(), manual_entries.len());
    entries
}

fn resolve_manual_entry(entry: &ManualEntry, config: &GeneratorConfig) -> SitemapEntry {
    let url = if is_absolute_url(&entry.location) {
        entry.location.clone()
    } else if entry.location.starts_with('/') {
        build_url(config, &entry.location)
    } else {
        build_url(config, &format!("/{}", entry.location))
    };

    let priority = entry.priority.and_then(|priority| {
        if !priority.is_finite() {
            tracing::warn!(
                "Manual route {} has non-finite priority {}, using the default",
                entry.location,
                priority
            );
            return None;
        }
        let clamped = priority.clamp(0.0, 1.0);
        if clamped != priority {
            tracing::warn!(
                "Manual route {} has priority {} outside of [0, 1], using {}",
                entry.location,
                priority,
                clamped
            );
        }
        Some(clamped)
    });

    SitemapEntry {
        url,
        lastmod: entry
            .last_modified
            .as_ref()
            .map(|lm| lm.to_lastmod())
            .or_else(|| config.lastmod().map(str::to_string)),
        changefreq: entry.change_frequency.or(config.default_changefreq()),
        priority: priority.or(config.default_priority()),
    }
}

/// Joins the configured base URL and an absolute path, honoring `trailing_slash`.
///
/// # Examples
///
/// ```
/// # use core_sitemap::{GeneratorConfig, build_url};
/// let config = GeneratorConfig::builder()
///     .base_url("https://example.com/")
///     .trailing_slash(true)
///     .build()
///     .unwrap();
/// assert_eq!(build_url(&config, "/"), "https://example.com/");
/// assert_eq!(build_url(&config, "/docs"), "https://example.com/docs/");
/// ```
pub fn build_url(config: &GeneratorConfig, path: &str) -> String {
    if config.trailing_slash() && path != "/" && !path.ends_with('/') {
        format!("{}{}/", config.base_url(), path)
    } else {
        format!("{}{}", config.base_url(), path)
    }
}

fn is_absolute_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::SitemapError,
        manual::{FnManualRoutes, LastModified, SyncFnManualRoutes},
        model::{ChangeFrequency, RouteOverride},
    };
    use chrono::{TimeZone, Utc};

    fn builder() -> crate::config::GeneratorConfigBuilder {
        GeneratorConfig::builder()
            .base_url("https://example.com")
            .lastmod("2024-01-01")
    }

    fn descriptor(path: &str) -> RouteDescriptor {
        RouteDescriptor {
            full_path: path.to_string(),
            overrides: None,
        }
    }

    #[test]
    fn test_build_url() {
        let config = builder().build().unwrap();
        assert_eq!(build_url(&config, "/"), "https://example.com/");
        assert_eq!(build_url(&config, "/about"), "https://example.com/about");
        assert_eq!(build_url(&config, "/about/"), "https://example.com/about/");
    }

    #[test]
    fn test_build_url_trailing_slash() {
        let config = builder().base_url("https://example.com/").trailing_slash(true).build().unwrap();
        assert_eq!(build_url(&config, "/"), "https://example.com/");
        assert_eq!(build_url(&config, "/about"), "https://example.com/about/");
        assert_eq!(build_url(&config, "/about/"), "https://example.com/about/");
    }

    #[test]
    fn test_resolve_routes_defaults() {
        let config = builder().build().unwrap();
        let entries = resolve_routes(&[descriptor("/"), descriptor("/about")], &config);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].url, "https://example.com/about");
        assert_eq!(entries[1].lastmod.as_deref(), Some("2024-01-01"));
        assert_eq!(entries[1].changefreq, Some(ChangeFrequency::Weekly));
        assert_eq!(entries[1].priority, Some(0.5));
    }

    #[test]
    fn test_resolve_routes_overrides() {
        let config = builder().build().unwrap();
        let overridden = RouteDescriptor {
            full_path: "/".to_string(),
            overrides: Some(RouteOverride {
                priority: Some(1.0),
                changefreq: Some(ChangeFrequency::Daily),
                lastmod: None,
            }),
        };
        let entries = resolve_routes(&[overridden], &config);
        assert_eq!(entries[0].priority, Some(1.0));
        assert_eq!(entries[0].changefreq, Some(ChangeFrequency::Daily));
        assert_eq!(entries[0].lastmod.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_resolve_routes_omitted_defaults() {
        let config = builder()
            .omit_default_changefreq()
            .omit_default_priority()
            .omit_lastmod()
            .build()
            .unwrap();
        let entries = resolve_routes(&[descriptor("/")], &config);
        assert_eq!(entries[0], SitemapEntry::new("https://example.com/"));
    }

    #[test]
    fn test_resolve_routes_deduplicates_first_wins() {
        let config = builder().build().unwrap();
        let first = RouteDescriptor {
            full_path: "/a".to_string(),
            overrides: Some(RouteOverride {
                priority: Some(0.1),
                ..Default::default()
            }),
        };
        let entries = resolve_routes(&[descriptor("/"), first, descriptor("/b"), descriptor("/a")], &config);
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://example.com/", "https://example.com/a", "https://example.com/b"]
        );
        assert_eq!(entries[1].priority, Some(0.1));
    }

    #[tokio::test]
    async fn test_resolve_manual_none_configured() {
        let config = builder().build().unwrap();
        assert!(resolve_manual(&config).await.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_manual_fields_win() {
        let ts = Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap();
        let config = builder()
            .manual_routes(vec![
                ManualEntry::new("/blog/post-1")
                    .priority(0.9)
                    .last_modified(ts)
                    .change_frequency(ChangeFrequency::Never),
                ManualEntry::new("/blog/post-2").last_modified("yesterday"),
                ManualEntry::new("/blog/post-3"),
            ])
            .build()
            .unwrap();
        let entries = resolve_manual(&config).await;
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].url, "https://example.com/blog/post-1");
        assert_eq!(entries[0].priority, Some(0.9));
        assert_eq!(entries[0].lastmod.as_deref(), Some("2024-02-29T08:00:00.000Z"));
        assert_eq!(entries[0].changefreq, Some(ChangeFrequency::Never));

        assert_eq!(entries[1].lastmod.as_deref(), Some("yesterday"));
        assert_eq!(entries[1].priority, Some(0.5));

        assert_eq!(entries[2].lastmod.as_deref(), Some("2024-01-01"));
        assert_eq!(entries[2].changefreq, Some(ChangeFrequency::Weekly));
    }

    #[tokio::test]
    async fn test_resolve_manual_ignores_route_options() {
        let config = builder()
            .route_option(
                "/special",
                RouteOverride {
                    priority: Some(1.0),
                    ..Default::default()
                },
            )
            .manual_routes(vec![ManualEntry::new("/special")])
            .build()
            .unwrap();
        let entries = resolve_manual(&config).await;
        assert_eq!(entries[0].priority, Some(0.5));
    }

    #[tokio::test]
    async fn test_resolve_manual_exclusions_use_raw_location() {
        let config = builder()
            .exclude_route("/drafts/*")
            .manual_routes(vec![
                ManualEntry::new("/drafts/one"),
                ManualEntry::new("/drafts"),
                ManualEntry::new("drafts/two"),
                ManualEntry::new("/published/one"),
            ])
            .build()
            .unwrap();
        let entries = resolve_manual(&config).await;
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        // "drafts/two" is matched before it is given a leading slash, so it survives
        assert_eq!(
            urls,
            vec!["https://example.com/drafts/two", "https://example.com/published/one"]
        );
    }

    #[tokio::test]
    async fn test_resolve_manual_absolute_locations() {
        let config = builder()
            .manual_routes(vec![ManualEntry::new("https://cdn.example.com/catalog")])
            .build()
            .unwrap();
        let entries = resolve_manual(&config).await;
        assert_eq!(entries[0].url, "https://cdn.example.com/catalog");
    }

    #[tokio::test]
    async fn test_resolve_manual_clamps_priority() {
        let config = builder()
            .manual_routes(vec![ManualEntry::new("/a").priority(3.0), ManualEntry::new("/b").priority(-1.0)])
            .build()
            .unwrap();
        let entries = resolve_manual(&config).await;
        assert_eq!(entries[0].priority, Some(1.0));
        assert_eq!(entries[1].priority, Some(0.0));
    }

    #[tokio::test]
    async fn test_resolve_manual_non_finite_priority_uses_default() {
        let config = builder()
            .manual_routes(vec![
                ManualEntry::new("/a").priority(f64::NAN),
                ManualEntry::new("/b").priority(f64::INFINITY),
            ])
            .build()
            .unwrap();
        let entries = resolve_manual(&config).await;
        assert_eq!(entries[0].priority, Some(0.5));
        assert_eq!(entries[1].priority, Some(0.5));

        let config = builder()
            .omit_default_priority()
            .manual_routes(vec![ManualEntry::new("/a").priority(f64::NAN)])
            .build()
            .unwrap();
        let entries = resolve_manual(&config).await;
        assert_eq!(entries[0].priority, None);
        let xml = crate::render::render_sitemap(&entries, false).unwrap();
        assert!(!xml.contains("NaN"));
    }

    #[tokio::test]
    async fn test_resolve_manual_provider_failure_is_recovered() {
        let config = builder()
            .manual_routes(SyncFnManualRoutes(|| {
                Err::<Vec<ManualEntry>, _>(SitemapError::ManualRoutes("database offline".to_string()))
            }))
            .build()
            .unwrap();
        assert!(resolve_manual(&config).await.is_empty());

        let config = builder()
            .manual_routes(FnManualRoutes(|| async {
                tokio::task::yield_now().await;
                Err::<Vec<ManualEntry>, _>(SitemapError::ManualRoutes("timeout".to_string()))
            }))
            .build()
            .unwrap();
        assert!(resolve_manual(&config).await.is_empty());
    }

    #[test]
    fn test_last_modified_text_passthrough() {
        let config = builder().build().unwrap();
        let entry = ManualEntry {
            location: "/x".to_string(),
            priority: None,
            last_modified: Some(LastModified::Text("not-a-date".to_string())),
            change_frequency: None,
        };
        assert_eq!(resolve_manual_entry(&entry, &config).lastmod.as_deref(), Some("not-a-date"));
    }
}
