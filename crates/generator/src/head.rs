//! `<head>` construction: site head tags, SEO metadata and stylesheets.
//!
//! Absolute URLs are built by plain concatenation onto the configured
//! hostname. Nothing here validates the hostname; a malformed value ends up
//! verbatim in every page.

use crate::escape::html_escape;
use guide_kit_core::{HeadTag, Site};

/// Placeholder in `[[head]]` attribute values replaced by the hostname
pub const HOSTNAME_PLACEHOLDER: &str = "{hostname}";

const VOID_TAGS: &[&str] = &["meta", "link", "base"];

/// Page-specific inputs to the head
#[derive(Debug, Clone, Default)]
pub struct HeadContext<'a> {
    pub lang_title: &'a str,
    pub page_title: Option<&'a str>,
    pub description: &'a str,
    pub route: &'a str,
    /// Frontmatter `title`, emitted as og:title when present
    pub og_title: Option<&'a str>,
    /// Frontmatter `description`, emitted as og:description when present
    pub og_description: Option<&'a str>,
    pub stylesheets: &'a [String],
}

/// Replace the hostname placeholder in a head attribute value
pub fn interpolate(value: &str, hostname: &str) -> String {
    value.replace(HOSTNAME_PLACEHOLDER, hostname)
}

/// Absolute URL for a route
pub fn absolute_url(hostname: &str, route: &str) -> String {
    format!("{}{}", hostname, route)
}

/// Render one configured head tag
pub fn render_head_tag(tag: &HeadTag, hostname: &str) -> String {
    let mut out = format!("<{}", tag.tag);
    for (name, value) in &tag.attrs {
        out.push_str(&format!(
            " {}=\"{}\"",
            name,
            html_escape(&interpolate(value, hostname))
        ));
    }
    out.push('>');

    if !VOID_TAGS.contains(&tag.tag.as_str()) {
        if let Some(content) = &tag.content {
            out.push_str(&interpolate(content, hostname));
        }
        out.push_str(&format!("</{}>", tag.tag));
    }
    out
}

/// Build the inner HTML of `<head>` for one page
pub fn build_head(site: &Site, ctx: &HeadContext<'_>) -> String {
    let hostname = site.hostname();
    let mut lines = vec![
        r#"<meta charset="utf-8">"#.to_string(),
        r#"<meta name="viewport" content="width=device-width,initial-scale=1">"#.to_string(),
    ];

    let title = match ctx.page_title {
        Some(page) if page != ctx.lang_title => format!("{} | {}", page, ctx.lang_title),
        _ => ctx.lang_title.to_string(),
    };
    lines.push(format!("<title>{}</title>", html_escape(&title)));
    lines.push(format!(
        r#"<meta name="description" content="{}">"#,
        html_escape(ctx.description)
    ));

    for tag in &site.head {
        lines.push(render_head_tag(tag, hostname));
    }

    if let Some(og_title) = ctx.og_title {
        lines.push(format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(og_title)
        ));
    }
    if let Some(og_description) = ctx.og_description {
        lines.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(og_description)
        ));
    }

    lines.push(format!(
        r#"<link rel="canonical" href="{}">"#,
        html_escape(&absolute_url(hostname, ctx.route))
    ));

    for sheet in ctx.stylesheets {
        lines.push(format!(
            r#"<link rel="stylesheet" href="{}">"#,
            html_escape(sheet)
        ));
    }

    lines.join("\n    ")
}
