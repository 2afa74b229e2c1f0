//! XML serialization of sitemap entries.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::{Result, SitemapError};
use crate::model::SitemapEntry;

/// XML namespace of the sitemap protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Renders entries as a sitemap document, in order.
///
/// Each `<url>` holds `<loc>`, then `<lastmod>`, `<changefreq>` and `<priority>`
/// when present. Priorities are written with one decimal digit. Text content is
/// XML-escaped. With `pretty_print` every element sits on its own line, indented
/// two spaces per level; without it the document is a single line.
///
/// # Errors
///
/// Returns an error only if the underlying XML writer fails.
///
/// # Examples
///
/// ```
/// # use core_sitemap::{SitemapEntry, render_sitemap};
/// let xml = render_sitemap(&[SitemapEntry::new("https://example.com/")], false).unwrap();
/// assert!(xml.contains("<url><loc>https://example.com/</loc></url>"));
/// ```
pub fn render_sitemap(entries: &[SitemapEntry], pretty_print: bool) -> Result<String> {
    let mut writer = if pretty_print {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NAMESPACE));
    write(&mut writer, Event::Start(urlset))?;

    for entry in entries {
        write(&mut writer, Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.url)?;
        if let Some(lastmod) = &entry.lastmod {
            write_text_element(&mut writer, "lastmod", lastmod)?;
        }
        if let Some(changefreq) = entry.changefreq {
            write_text_element(&mut writer, "changefreq", changefreq.as_str())?;
        }
        if let Some(priority) = entry.priority {
            write_text_element(&mut writer, "priority", &format!("{:.1}", priority))?;
        }
        write(&mut writer, Event::End(BytesEnd::new("url")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("urlset")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| SitemapError::Render(e.to_string()))
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| SitemapError::Render(e.to_string()))
}
