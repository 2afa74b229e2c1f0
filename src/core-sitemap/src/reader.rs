//! Reading sitemap documents back into entries.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::errors::{Result, SitemapError};
use crate::model::{ChangeFrequency, SitemapEntry};

/// Which child of `<url>` the next text event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    Lastmod,
    Changefreq,
    Priority,
}

/// Parses XML sitemap content into entries, in document order.
///
/// Supports XML sitemaps in the standard format:
/// ```xml
/// <urlset>
///   <url>
///     <loc>https://example.com/page</loc>
///     <lastmod>2024-01-01</lastmod>
///     <changefreq>weekly</changefreq>
///     <priority>0.5</priority>
///   </url>
/// </urlset>
/// ```
///
/// `<url>` blocks without a `<loc>` are skipped. An empty `<urlset>` yields no entries.
///
/// # Errors
///
/// Returns an error if the XML is malformed, or a change frequency or priority
/// cannot be parsed.
pub fn parse_sitemap(xml: &str) -> Result<Vec<SitemapEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<SitemapEntry> = None;
    let mut field: Option<Field> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                field = match e.name().as_ref() {
                    b"url" => {
                        current = Some(SitemapEntry::new(String::new()));
                        None
                    }
                    b"loc" => Some(Field::Loc),
                    b"lastmod" => Some(Field::Lastmod),
                    b"changefreq" => Some(Field::Changefreq),
                    b"priority" => Some(Field::Priority),
                    _ => None,
                };
            }
            Ok(Event::Text(text)) => {
                let value = text
                    .unescape()
                    .map_err(|e| SitemapError::SitemapParse(format!("Invalid XML: {}", e)))?
                    .to_string();
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    apply_field(entry, field, value)?;
                }
            }
            Ok(Event::End(ref e)) => {
                field = None;
                if e.name().as_ref() == b"url"
                    && let Some(entry) = current.take()
                    && !entry.url.is_empty()
                {
                    entries.push(entry);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SitemapError::SitemapParse(format!("XML parsing error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn apply_field(entry: &mut SitemapEntry, field: Field, value: String) -> Result<()> {
    match field {
        Field::Loc => entry.url = value,
        Field::Lastmod => entry.lastmod = Some(value),
        Field::Changefreq => entry.changefreq = Some(value.parse::<ChangeFrequency>()?),
        Field::Priority => {
            let priority = value
                .trim()
                .parse::<f64>()
                .map_err(|e| SitemapError::SitemapParse(format!("Invalid priority '{}': {}", value, e)))?;
            entry.priority = Some(priority);
        }
    }
    Ok(())
}
