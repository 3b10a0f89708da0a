//! Internal link integrity: navigation, sidebar and links inside content.

use guide_kit_core::route::{is_external, resolve_link, route_to_source, strip_fragment};
use guide_kit_core::{ContentTree, LocaleConfig, NavItem, ROOT_LOCALE, SidebarGroup, Site};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;

/// A link that does not resolve, with where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Human-readable origin, e.g. `sidebar (en) › Lessons › Tools`
    pub origin: String,
    pub link: String,
    /// Source file the link was expected to resolve to
    pub expected: String,
}

impl BrokenLink {
    pub fn message(&self) -> String {
        format!(
            "{}: link '{}' does not resolve (expected {})",
            self.origin, self.link, self.expected
        )
    }
}

/// Check every nav and sidebar link, global and per locale
pub fn check_navigation(site: &Site, content: &ContentTree) -> Vec<BrokenLink> {
    let mut broken = Vec::new();

    check_nav_items(&site.theme_config.nav, "nav", content, &mut broken);
    check_sidebar(&site.theme_config.sidebar, "sidebar", content, &mut broken);

    for (key, locale) in &site.locales {
        check_locale(key, locale, content, &mut broken);
    }

    broken
}

fn check_locale(
    key: &str,
    locale: &LocaleConfig,
    content: &ContentTree,
    broken: &mut Vec<BrokenLink>,
) {
    if let Some(nav) = &locale.theme_config.nav {
        check_nav_items(nav, &format!("nav ({})", key), content, broken);
    }
    if let Some(sidebar) = &locale.theme_config.sidebar {
        check_sidebar(sidebar, &format!("sidebar ({})", key), content, broken);
    }
    if key != ROOT_LOCALE
        && let Some(link) = &locale.link
    {
        check_route(link, &format!("locale link ({})", key), content, broken);
    }
}

fn check_nav_items(
    items: &[NavItem],
    origin: &str,
    content: &ContentTree,
    broken: &mut Vec<BrokenLink>,
) {
    for item in items {
        check_route(
            &item.link,
            &format!("{} › {}", origin, item.text),
            content,
            broken,
        );
    }
}

fn check_sidebar(
    groups: &[SidebarGroup],
    origin: &str,
    content: &ContentTree,
    broken: &mut Vec<BrokenLink>,
) {
    for group in groups {
        for item in &group.items {
            check_route(
                &item.link,
                &format!("{} › {} › {}", origin, group.text, item.text),
                content,
                broken,
            );
        }
    }
}

fn check_route(link: &str, origin: &str, content: &ContentTree, broken: &mut Vec<BrokenLink>) {
    let Some(expected) = route_to_source(link) else {
        return;
    };
    if !content.contains(&expected) {
        broken.push(BrokenLink {
            origin: origin.to_string(),
            link: link.to_string(),
            expected,
        });
    }
}

/// Collect link destinations from a Markdown body
pub fn markdown_links(body: &str) -> Vec<String> {
    Parser::new(body)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.into_string()),
            _ => None,
        })
        .collect()
}

/// Check the internal links inside every content page.
///
/// Links to pages must resolve to a source file; links to other files must
/// exist either in `public/` or next to the page.
pub fn check_content_links(content: &ContentTree) -> Result<Vec<BrokenLink>, guide_kit_core::Error> {
    let mut broken = Vec::new();

    for page in &content.pages {
        let loaded = page.load()?;
        let mut links = markdown_links(&loaded.body);
        if let Some(hero) = &loaded.frontmatter.hero {
            links.extend(hero.actions.iter().map(|a| a.link.clone()));
        }
        links.extend(loaded.frontmatter.features.iter().filter_map(|f| f.link.clone()));

        for link in links {
            if let Some(expected) = check_content_link(content, &page.relative, &link) {
                broken.push(BrokenLink {
                    origin: page.relative.clone(),
                    link,
                    expected,
                });
            }
        }
    }

    Ok(broken)
}

/// Returns the expected target when `link` does not resolve
fn check_content_link(content: &ContentTree, from: &str, link: &str) -> Option<String> {
    if is_external(link) {
        return None;
    }
    let resolved = resolve_link(from, link)?;

    if is_asset(&resolved) {
        let rel = strip_fragment(&resolved).trim_start_matches('/');
        let in_public = content.public_dir().join(rel);
        let beside = content.root.join(rel);
        if in_public.exists() || beside.exists() {
            return None;
        }
        return Some(format!("public/{}", rel));
    }

    let expected = route_to_source(&resolved)?;
    if content.contains(&expected) {
        None
    } else {
        Some(expected)
    }
}

/// Links with an extension other than .md/.html point at static files
fn is_asset(path: &str) -> bool {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext != "md" && ext != "html",
        None => false,
    }
}
