//! Sitemap generation.
//!
//! Every `<loc>` is the configured hostname followed by the page route:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://clawdbot-guide.com/guide/intro</loc>
//!     <lastmod>2026-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::escape::escape_xml;
use crate::head::absolute_url;
use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Output path of the sitemap
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    /// Full URL location
    pub loc: String,
    /// Last modification date, YYYY-MM-DD
    pub lastmod: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. `href` is the route as linked (with `.html` when clean URLs are off).
    pub fn push(&mut self, hostname: &str, href: &str, modified: Option<SystemTime>) {
        self.urls.push(UrlEntry {
            loc: absolute_url(hostname, href),
            lastmod: modified.map(format_lastmod),
        });
    }

    pub fn entries(&self) -> &[UrlEntry] {
        &self.urls
    }

    /// Generate sitemap XML string
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 96);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in &self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = &entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

fn format_lastmod(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d").to_string()
}
