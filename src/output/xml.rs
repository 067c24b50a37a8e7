//! Sitemap XML serialization
//!
//! Renders a [`SitemapDocument`] in the sitemaps.org 0.9 format and writes it
//! to disk.

use crate::output::sitemap::SitemapDocument;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Writes the sitemap document to a file
///
/// Parent directories are created when missing.
///
/// # Returns
///
/// * `Ok(usize)` - Number of entries written
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_sitemap(document: &SitemapDocument, output_path: &Path) -> OutputResult<usize> {
    let xml = render_xml(document);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(output_path)?;
    file.write_all(xml.as_bytes())?;

    Ok(document.len())
}

/// Formats a sitemap document as XML
pub fn render_xml(document: &SitemapDocument) -> String {
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));

    for entry in &document.entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escapes the five XML special characters
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
