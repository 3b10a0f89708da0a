// Static site generation: Markdown pages, theme chrome, sitemap and search

pub mod escape;
pub mod head;
pub mod home;
pub mod markdown;
pub mod search;
pub mod sitemap;
pub mod theme;

use anyhow::{Context, Result};
use guide_kit_core::route::{route_to_href, route_to_output};
use guide_kit_core::{ContentTree, LocaleRouter, PageLayout, Site, SourcePage};
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

use head::{HeadContext, build_head};
use home::{HOME_SCRIPT, HomePage, home_script};
use markdown::{Heading, render_markdown};
use search::{SearchDocument, SearchIndices};
use sitemap::{SITEMAP_FILE, Sitemap};
use theme::{AppRegistry, PageContext, Theme, theme_for};

/// In-memory build output
#[derive(Debug, Default)]
pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
}

impl GeneratedSite {
    pub fn page(&self, path: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, html)| html.as_str())
    }

    pub fn asset(&self, path: &str) -> Option<&[u8]> {
        self.assets
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.as_slice())
    }
}

/// One rendered page with the data the sitemap and search index need
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub route: String,
    pub output_path: String,
    pub html: String,
    pub locale: String,
    pub lang: String,
    pub layout: PageLayout,
    pub title: String,
    pub headings: Vec<Heading>,
    pub text: String,
    pub modified: Option<SystemTime>,
}

/// Live reload client for the dev server
const LIVE_RELOAD_SNIPPET: &str = r#"<script>
    // Hot reload via Server-Sent Events
    const eventSource = new EventSource('/_reload');
    eventSource.onmessage = () => location.reload();
    eventSource.onerror = () => eventSource.close();
</script>
"#;

/// Renders pages of one site with one theme
pub struct Generator<'a> {
    site: &'a Site,
    content: &'a ContentTree,
    router: LocaleRouter,
    theme: Box<dyn Theme>,
    app: AppRegistry,
}

impl<'a> Generator<'a> {
    pub fn new(site: &'a Site, content: &'a ContentTree) -> Result<Self> {
        let theme = theme_for(site)?;
        let mut app = AppRegistry::default();
        theme.enhance_app(&mut app);
        tracing::debug!(theme = theme.name(), "theme selected");

        Ok(Self {
            site,
            content,
            router: LocaleRouter::new(site),
            theme,
            app,
        })
    }

    /// Inject the dev server's reload client into every page
    pub fn with_live_reload(mut self) -> Self {
        self.app.body_snippets.push(LIVE_RELOAD_SNIPPET.to_string());
        self
    }

    pub fn router(&self) -> &LocaleRouter {
        &self.router
    }

    /// Render a single source page
    pub fn render_page(&self, page: &SourcePage) -> Result<RenderedPage> {
        let loaded = page.load()?;
        let fm = &loaded.frontmatter;
        let locale = self.router.locale_for_source(&page.relative);
        let resolved = self.router.resolve_theme(self.site, locale);

        let md = render_markdown(&loaded.body, &page.relative, self.site.clean_urls);
        let title = fm
            .title
            .clone()
            .or_else(|| md.title().map(str::to_string))
            .unwrap_or_else(|| locale.title.clone());
        let description = fm
            .description
            .clone()
            .unwrap_or_else(|| locale.description.clone());

        let content_html = if fm.layout == PageLayout::Home {
            let home = HomePage::new(
                &page.relative,
                &title,
                &description,
                fm,
                self.site.clean_urls,
            );
            if md.html.trim().is_empty() {
                home.render()
            } else {
                format!(
                    "{}\n<div class=\"home-content\">\n{}</div>",
                    home.render(),
                    md.html
                )
            }
        } else {
            md.html.clone()
        };

        let stylesheets = self.theme.stylesheets();
        let href = route_to_href(&page.route, self.site.clean_urls);
        let head = build_head(
            self.site,
            &HeadContext {
                lang_title: &locale.title,
                page_title: (fm.layout != PageLayout::Home).then_some(title.as_str()),
                description: &description,
                route: &href,
                og_title: fm.title.as_deref(),
                og_description: fm.description.as_deref(),
                stylesheets: &stylesheets,
            },
        );

        let last_updated = if self.site.last_updated {
            loaded.modified.map(format_last_updated)
        } else {
            None
        };

        let html = self.theme.layout(&PageContext {
            site: self.site,
            router: &self.router,
            locale,
            theme: &resolved,
            route: &page.route,
            relative: &page.relative,
            layout: fm.layout,
            head: &head,
            content: &content_html,
            headings: &md.headings,
            last_updated: last_updated.as_deref(),
            app: &self.app,
        });

        Ok(RenderedPage {
            route: page.route.clone(),
            output_path: route_to_output(&page.route),
            html,
            locale: locale.key.clone(),
            lang: locale.lang.clone(),
            layout: fm.layout,
            title,
            headings: md.headings,
            text: md.text,
            modified: loaded.modified,
        })
    }

    /// Render whatever page a request path maps to, if any
    pub fn render_request(&self, request_path: &str) -> Result<Option<RenderedPage>> {
        match find_page(self.content, request_path) {
            Some(page) => self.render_page(page).map(Some),
            None => Ok(None),
        }
    }

    /// Render the whole site in memory
    pub fn generate(&self) -> Result<GeneratedSite> {
        let hostname = self.site.hostname();
        let clean = self.site.clean_urls;
        let mut generated = GeneratedSite::default();
        let mut sitemap = Sitemap::new();
        let mut search = SearchIndices::new();
        let mut has_home = false;

        for page in &self.content.pages {
            let rendered = self
                .render_page(page)
                .with_context(|| format!("Failed to render {}", page.relative))?;
            tracing::debug!(route = %rendered.route, output = %rendered.output_path, "rendered page");

            let href = route_to_href(&rendered.route, clean);
            let lastmod = if self.site.last_updated {
                rendered.modified
            } else {
                None
            };
            sitemap.push(hostname, &href, lastmod);

            search.add(
                &rendered.locale,
                &rendered.lang,
                SearchDocument {
                    route: href,
                    title: rendered.title.clone(),
                    headings: rendered
                        .headings
                        .iter()
                        .filter(|h| h.level == 2 || h.level == 3)
                        .map(|h| h.text.clone())
                        .collect(),
                    text: rendered.text.clone(),
                },
            );

            has_home |= rendered.layout == PageLayout::Home;
            generated.pages.push((rendered.output_path, rendered.html));
        }

        generated.assets.extend(self.theme.assets());
        if has_home {
            generated
                .assets
                .push((HOME_SCRIPT.to_string(), home_script().as_bytes().to_vec()));
        }
        generated
            .assets
            .push((SITEMAP_FILE.to_string(), sitemap.to_xml().into_bytes()));
        generated
            .assets
            .extend(search.to_assets().context("Failed to serialize search index")?);

        tracing::info!(
            pages = generated.pages.len(),
            assets = generated.assets.len(),
            "site generated"
        );
        Ok(generated)
    }
}

/// Render a site in one call
pub fn generate_site(site: &Site, content: &ContentTree) -> Result<GeneratedSite> {
    Generator::new(site, content)?.generate()
}

/// Map a request path onto a source page.
///
/// Accepts `/guide/intro`, `/guide/intro.html`, `/en/`, `/en` and
/// `/en/index.html`.
pub fn find_page<'c>(content: &'c ContentTree, request_path: &str) -> Option<&'c SourcePage> {
    let path = if request_path.is_empty() {
        "/"
    } else {
        request_path
    };
    let path = path
        .strip_suffix("index.html")
        .or_else(|| path.strip_suffix(".html"))
        .unwrap_or(path);

    content
        .find_route(path)
        .or_else(|| content.find_route(&format!("{}/", path.trim_end_matches('/'))))
}

fn format_last_updated(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(time)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Counts of files written by [`write_site`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteStats {
    pub pages: usize,
    pub assets: usize,
    pub public_files: usize,
}

/// Write a generated site to disk and copy `public_dir` verbatim
pub fn write_site(
    generated: &GeneratedSite,
    out_dir: &Path,
    public_dir: Option<&Path>,
) -> Result<WriteStats> {
    let mut stats = WriteStats::default();
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    // public/ first so generated files win on collision
    if let Some(public) = public_dir.filter(|p| p.is_dir()) {
        for entry in WalkDir::new(public) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(public)?;
            let dst = out_dir.join(rel);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            stats.public_files += 1;
        }
    }

    for (path, html) in &generated.pages {
        write_file(out_dir, path, html.as_bytes())?;
        stats.pages += 1;
    }
    for (path, data) in &generated.assets {
        write_file(out_dir, path, data)?;
        stats.assets += 1;
    }

    tracing::info!(out_dir = %out_dir.display(), ?stats, "site written");
    Ok(stats)
}

fn write_file(out_dir: &Path, rel: &str, data: &[u8]) -> Result<()> {
    let dst = out_dir.join(rel);
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&dst, data).with_context(|| format!("Failed to write {}", dst.display()))
}
