//! Markdown to HTML with heading anchors and route-aware links.

use guide_kit_core::route::{is_external, resolve_link, route_to_href, source_to_route};
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

/// Rendered body plus what the outline and search index need
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub html: String,
    pub headings: Vec<Heading>,
    /// Body text with markup stripped
    pub text: String,
}

impl RenderedMarkdown {
    /// Text of the first `# h1`
    pub fn title(&self) -> Option<&str> {
        self.headings
            .iter()
            .find(|h| h.level == 1)
            .map(|h| h.text.as_str())
    }

    /// h2 and h3 headings, for the page outline
    pub fn outline(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(|h| h.level == 2 || h.level == 3)
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_FOOTNOTES
}

/// Render a Markdown body found at `from_relative` in the source tree
pub fn render_markdown(body: &str, from_relative: &str, clean_urls: bool) -> RenderedMarkdown {
    let mut events: Vec<Event<'_>> = Parser::new_ext(body, options()).collect();
    let headings = assign_heading_ids(&mut events);

    let mut text = String::new();
    let mut in_code_block = false;
    for event in &mut events {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(href) = rewrite_link(dest_url, from_relative, clean_urls) {
                    *dest_url = CowStr::from(href);
                }
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) | Event::Code(t) if !in_code_block => {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(t.trim());
            }
            _ => {}
        }
    }

    let mut html_out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut html_out, events.into_iter());

    RenderedMarkdown {
        html: html_out,
        headings,
        text,
    }
}

/// Give every heading an id, keeping explicit `{#id}` attributes
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<Heading> {
    let mut headings = Vec::new();
    // Explicit ids are reserved up front so generated slugs never collide with them
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    for i in 0..events.len() {
        let Event::Start(Tag::Heading { level, .. }) = &events[i] else {
            continue;
        };
        let level = heading_depth(*level);

        let mut heading_text = String::new();
        for event in &events[i + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => heading_text.push_str(t),
                _ => {}
            }
        }
        let heading_text = heading_text.trim().to_string();

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            let slug = match id {
                Some(explicit) => explicit.to_string(),
                None => unique_slug(&slugify(&heading_text), &mut used),
            };
            *id = Some(CowStr::from(slug.clone()));
            headings.push(Heading {
                level,
                text: heading_text,
                id: slug,
            });
        }
    }

    headings
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Anchor slug: lowercase, word characters kept, runs of spaces and dashes collapsed
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '_' {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

fn unique_slug(base: &str, used: &mut HashSet<String>) -> String {
    let mut slug = base.to_string();
    let mut n = 1;
    while used.contains(&slug) {
        slug = format!("{}-{}", base, n);
        n += 1;
    }
    used.insert(slug.clone());
    slug
}

/// Rewrite links to `.md` sources into the page routes they render at
fn rewrite_link(link: &str, from_relative: &str, clean_urls: bool) -> Option<String> {
    if is_external(link) {
        return None;
    }
    let (path, fragment) = match link.find('#') {
        Some(idx) => (&link[..idx], &link[idx..]),
        None => (link, ""),
    };
    if !path.ends_with(".md") {
        return None;
    }
    let resolved = resolve_link(from_relative, path)?;
    let route = source_to_route(resolved.trim_start_matches('/'));
    Some(format!("{}{}", route_to_href(&route, clean_urls), fragment))
}
