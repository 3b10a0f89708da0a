//! Mapping between source files, routes and output files.
//!
//! A source path is always relative to the source directory and uses `/`
//! separators, e.g. `en/guide/intro.md`. A route is the absolute URL path
//! the page is served at, e.g. `/en/guide/intro`.

use std::path::Path;

/// Convert a relative source path into the page's route
///
/// ```text
/// index.md            → /
/// en/index.md         → /en/
/// guide/index.md      → /guide/
/// guide/intro.md      → /guide/intro
/// ```
pub fn source_to_route(relative: &str) -> String {
    let stem = relative.strip_suffix(".md").unwrap_or(relative);
    if stem == "index" {
        return "/".to_string();
    }
    if let Some(dir) = stem.strip_suffix("/index") {
        return format!("/{}/", dir);
    }
    format!("/{}", stem)
}

/// Output file for a route, relative to the output directory
pub fn route_to_output(route: &str) -> String {
    let trimmed = route.trim_start_matches('/');
    if trimmed.is_empty() {
        "index.html".to_string()
    } else if trimmed.ends_with('/') {
        format!("{}index.html", trimmed)
    } else {
        format!("{}.html", trimmed)
    }
}

/// Link href for a route, honouring the clean URL setting
pub fn route_to_href(route: &str, clean_urls: bool) -> String {
    if clean_urls || route.ends_with('/') {
        route.to_string()
    } else {
        format!("{}.html", route)
    }
}

/// Whether a link leaves the site
pub fn is_external(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    // scheme: letters followed by ':' before any '/'
    match link.find(':') {
        Some(idx) => {
            let scheme = &link[..idx];
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        }
        None => false,
    }
}

/// Strip `#fragment` and `?query` from a link
pub fn strip_fragment(link: &str) -> &str {
    let end = link.find(['#', '?']).unwrap_or(link.len());
    &link[..end]
}

/// Resolve an absolute internal link to the source file it must exist as
///
/// Returns `None` for external links and pure fragment links.
///
/// ```text
/// /guide/intro        → guide/intro.md
/// /guide/intro.html   → guide/intro.md
/// /en/                → en/index.md
/// /                   → index.md
/// ```
pub fn route_to_source(link: &str) -> Option<String> {
    if is_external(link) {
        return None;
    }
    let path = strip_fragment(link);
    if path.is_empty() {
        return None;
    }
    let path = path.trim_start_matches('/');
    if path.is_empty() || path.ends_with('/') {
        return Some(format!("{}index.md", path));
    }
    let stem = path
        .strip_suffix(".html")
        .or_else(|| path.strip_suffix(".md"))
        .unwrap_or(path);
    Some(format!("{}.md", stem))
}

/// Resolve a link found inside a Markdown document into an absolute route-like path
///
/// Relative links resolve against the directory of `from_source`.
/// Returns `None` for external and fragment-only links.
pub fn resolve_link(from_source: &str, link: &str) -> Option<String> {
    if is_external(link) {
        return None;
    }
    let path = strip_fragment(link);
    if path.is_empty() {
        return None;
    }
    if path.starts_with('/') {
        return Some(path.to_string());
    }

    let base = Path::new(from_source)
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut resolved = format!("/{}", segments.join("/"));
    if path.ends_with('/') && !resolved.ends_with('/') {
        resolved.push('/');
    }
    Some(resolved)
}
