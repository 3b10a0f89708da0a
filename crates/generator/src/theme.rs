//! Themes: page chrome around rendered content.
//!
//! [`DefaultTheme`] draws the nav bar, sidebar, outline, doc footer and site
//! footer. [`CustomTheme`] extends it with a project stylesheet and its own
//! layout entry point, which currently hands straight through to the
//! default layout.

use crate::escape::html_escape;
use crate::markdown::Heading;
use crate::search::index_path;
use guide_kit_core::route::{is_external, route_to_href, strip_fragment};
use guide_kit_core::{
    LayoutKind, Locale, LocaleRouter, PageLayout, ResolvedTheme, SidebarItem, Site,
};
use std::fs;

pub const THEME_STYLESHEET: &str = "assets/theme.css";
pub const CUSTOM_STYLESHEET: &str = "assets/style.css";
pub const SEARCH_SCRIPT: &str = "assets/search.js";

/// Everything a layout needs to render one page
pub struct PageContext<'a> {
    pub site: &'a Site,
    pub router: &'a LocaleRouter,
    pub locale: &'a Locale,
    pub theme: &'a ResolvedTheme,
    pub route: &'a str,
    pub relative: &'a str,
    pub layout: PageLayout,
    pub head: &'a str,
    pub content: &'a str,
    pub headings: &'a [Heading],
    pub last_updated: Option<&'a str>,
    pub app: &'a AppRegistry,
}

/// Global additions registered once per build through [`Theme::enhance_app`]
#[derive(Debug, Default, Clone)]
pub struct AppRegistry {
    /// Script URLs appended to every page body
    pub scripts: Vec<String>,
    /// Raw HTML appended to every page body
    pub body_snippets: Vec<String>,
}

pub trait Theme: Send + Sync {
    fn name(&self) -> &'static str;

    /// Stylesheet URLs linked from every page
    fn stylesheets(&self) -> Vec<String>;

    /// Static files the theme ships, `(output path, bytes)`
    fn assets(&self) -> Vec<(String, Vec<u8>)>;

    /// Render a complete HTML document
    fn layout(&self, ctx: &PageContext<'_>) -> String;

    /// Extension point for global registrations; nothing by default
    fn enhance_app(&self, _app: &mut AppRegistry) {}
}

/// Pick the theme for a site, reading its stylesheet if one is configured
pub fn theme_for(site: &Site) -> anyhow::Result<Box<dyn Theme>> {
    match (&site.theme.stylesheet, site.theme.layout) {
        (Some(sheet), _) => {
            let path = site.root.join(sheet);
            let css = fs::read(&path).map_err(|e| {
                anyhow::anyhow!("Failed to read theme stylesheet {}: {}", path.display(), e)
            })?;
            Ok(Box::new(CustomTheme::new(Some(css))))
        }
        (None, LayoutKind::Custom) => Ok(Box::new(CustomTheme::new(None))),
        (None, LayoutKind::Default) => Ok(Box::new(DefaultTheme)),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {
    fn name(&self) -> &'static str {
        "default"
    }

    fn stylesheets(&self) -> Vec<String> {
        vec![format!("/{}", THEME_STYLESHEET)]
    }

    fn assets(&self) -> Vec<(String, Vec<u8>)> {
        vec![
            (THEME_STYLESHEET.to_string(), DEFAULT_CSS.as_bytes().to_vec()),
            (SEARCH_SCRIPT.to_string(), SEARCH_JS.as_bytes().to_vec()),
        ]
    }

    fn layout(&self, ctx: &PageContext<'_>) -> String {
        let body = match ctx.layout {
            PageLayout::Home => format!(
                "<main class=\"content content-home\">\n{}\n</main>",
                ctx.content
            ),
            PageLayout::Page => format!(
                "<main class=\"content content-page\">\n{}\n</main>",
                ctx.content
            ),
            PageLayout::Doc => format!(
                "{}\n<main class=\"content content-doc\">\n<article class=\"doc\">\n{}\n</article>\n{}\n</main>\n{}",
                render_sidebar(ctx),
                ctx.content,
                render_doc_footer(ctx),
                render_outline(ctx)
            ),
        };

        let mut scripts = vec![format!("/{}", SEARCH_SCRIPT)];
        if ctx.layout == PageLayout::Home {
            scripts.push(format!("/{}", crate::home::HOME_SCRIPT));
        }
        scripts.extend(ctx.app.scripts.iter().cloned());
        let scripts: String = scripts
            .iter()
            .map(|src| format!("<script src=\"{}\" defer></script>\n", html_escape(src)))
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    {head}
</head>
<body data-search-index="/{index}">
<div class="layout layout-{kind}">
{nav}
{body}
{footer}
</div>
{scripts}{snippets}</body>
</html>
"#,
            lang = html_escape(&ctx.locale.lang),
            head = ctx.head,
            index = index_path(&ctx.locale.key),
            kind = layout_class(ctx.layout),
            nav = render_nav(ctx),
            body = body,
            footer = render_footer(ctx),
            scripts = scripts,
            snippets = ctx.app.body_snippets.concat(),
        )
    }
}

/// Default theme plus a project stylesheet and a substitutable layout
#[derive(Debug, Default, Clone)]
pub struct CustomTheme {
    inner: DefaultTheme,
    stylesheet: Option<Vec<u8>>,
}

impl CustomTheme {
    pub fn new(stylesheet: Option<Vec<u8>>) -> Self {
        Self {
            inner: DefaultTheme,
            stylesheet,
        }
    }
}

impl Theme for CustomTheme {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn stylesheets(&self) -> Vec<String> {
        let mut sheets = self.inner.stylesheets();
        if self.stylesheet.is_some() {
            sheets.push(format!("/{}", CUSTOM_STYLESHEET));
        }
        sheets
    }

    fn assets(&self) -> Vec<(String, Vec<u8>)> {
        let mut assets = self.inner.assets();
        if let Some(css) = &self.stylesheet {
            assets.push((CUSTOM_STYLESHEET.to_string(), css.clone()));
        }
        assets
    }

    fn layout(&self, ctx: &PageContext<'_>) -> String {
        self.inner.layout(ctx)
    }
}

fn layout_class(layout: PageLayout) -> &'static str {
    match layout {
        PageLayout::Doc => "doc",
        PageLayout::Home => "home",
        PageLayout::Page => "page",
    }
}

/// href for a configured link: external links untouched, routes per clean URL setting
pub fn link_href(link: &str, clean_urls: bool) -> String {
    if is_external(link) {
        return link.to_string();
    }
    let raw = strip_fragment(link);
    let suffix = &link[raw.len()..];
    let path = page_path(raw);
    let has_extension = path
        .rsplit('/')
        .next()
        .is_some_and(|last| last.contains('.'));
    if path.is_empty() || has_extension {
        return link.to_string();
    }
    if path.ends_with('/') {
        return format!("{}{}", path, suffix);
    }
    format!("{}{}", route_to_href(path, clean_urls), suffix)
}

/// Route a configured link points at, for active-state comparison
fn link_route(link: &str) -> String {
    page_path(strip_fragment(link)).to_string()
}

/// Drop a `.md` or `.html` page suffix; `dir/index.md` becomes `dir/`
fn page_path(path: &str) -> &str {
    match path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".html"))
    {
        Some(route) => route
            .strip_suffix("index")
            .filter(|dir| dir.ends_with('/'))
            .unwrap_or(route),
        None => path,
    }
}

fn render_nav(ctx: &PageContext<'_>) -> String {
    let clean = ctx.site.clean_urls;
    let mut out = String::from("<header class=\"nav\">\n");

    out.push_str(&format!(
        "  <a class=\"nav-title\" href=\"{}\">",
        html_escape(&ctx.locale.link)
    ));
    if let Some(logo) = &ctx.theme.logo {
        out.push_str(&format!(
            "<img class=\"nav-logo\" src=\"{}\" alt=\"\">",
            html_escape(logo)
        ));
    }
    out.push_str(&format!("<span>{}</span></a>\n", html_escape(&ctx.theme.site_title)));

    out.push_str("  <nav class=\"nav-links\">\n");
    for item in &ctx.theme.nav {
        let active = if nav_is_active(&item.link, ctx.route, &ctx.locale.link) {
            " active"
        } else {
            ""
        };
        out.push_str(&format!(
            "    <a class=\"nav-link{}\" href=\"{}\">{}</a>\n",
            active,
            html_escape(&link_href(&item.link, clean)),
            html_escape(&item.text)
        ));
    }
    out.push_str("  </nav>\n");

    if ctx.theme.search.is_some() {
        let translations = ctx
            .theme
            .search
            .as_ref()
            .and_then(|s| s.locales.get(&ctx.locale.key));
        let button = translations
            .and_then(|t| t.button_text.as_deref())
            .unwrap_or("Search");
        let placeholder = translations
            .and_then(|t| t.placeholder.as_deref())
            .unwrap_or("Search docs");
        let no_results = translations
            .and_then(|t| t.no_results_text.as_deref())
            .unwrap_or("No results");
        out.push_str(&format!(
            "  <div class=\"search\" data-no-results=\"{}\"><input type=\"search\" class=\"search-input\" placeholder=\"{}\" aria-label=\"{}\"><ul class=\"search-results\"></ul></div>\n",
            html_escape(no_results),
            html_escape(placeholder),
            html_escape(button)
        ));
    }

    if ctx.router.locales().len() > 1 {
        out.push_str("  <div class=\"locale-switch\">\n");
        for locale in ctx.router.locales() {
            let target = ctx.router.alternate_route(ctx.route, locale);
            let current = if locale.key == ctx.locale.key {
                " current"
            } else {
                ""
            };
            out.push_str(&format!(
                "    <a class=\"locale{}\" lang=\"{}\" href=\"{}\">{}</a>\n",
                current,
                html_escape(&locale.lang),
                html_escape(&route_to_href(&target, clean)),
                html_escape(&locale.label)
            ));
        }
        out.push_str("  </div>\n");
    }

    if !ctx.theme.social_links.is_empty() {
        out.push_str("  <div class=\"social-links\">\n");
        for social in &ctx.theme.social_links {
            out.push_str(&format!(
                "    <a class=\"social social-{}\" href=\"{}\" aria-label=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n",
                html_escape(&social.icon),
                html_escape(&social.link),
                html_escape(&social.icon),
                html_escape(&social.icon)
            ));
        }
        out.push_str("  </div>\n");
    }

    out.push_str("</header>");
    out
}

// Locale home links would match every route, so only deeper links highlight
fn nav_is_active(link: &str, route: &str, locale_link: &str) -> bool {
    if is_external(link) || link == "/" || link == locale_link {
        return false;
    }
    let target = link_route(link);
    if target.ends_with('/') {
        return route.starts_with(target.as_str());
    }
    route
        .strip_prefix(target.as_str())
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn render_sidebar(ctx: &PageContext<'_>) -> String {
    if ctx.theme.sidebar.is_empty() {
        return String::new();
    }
    let clean = ctx.site.clean_urls;
    let mut out = String::from("<aside class=\"sidebar\">\n");
    for group in &ctx.theme.sidebar {
        let collapsed = if group.collapsed { " collapsed" } else { "" };
        out.push_str(&format!(
            "  <section class=\"sidebar-group{}\">\n    <h2 class=\"sidebar-title\">{}</h2>\n    <ul>\n",
            collapsed,
            html_escape(&group.text)
        ));
        for item in &group.items {
            let active = if link_route(&item.link) == ctx.route {
                " class=\"active\""
            } else {
                ""
            };
            out.push_str(&format!(
                "      <li><a{} href=\"{}\">{}</a></li>\n",
                active,
                html_escape(&link_href(&item.link, clean)),
                html_escape(&item.text)
            ));
        }
        out.push_str("    </ul>\n  </section>\n");
    }
    out.push_str("</aside>");
    out
}

fn render_outline(ctx: &PageContext<'_>) -> String {
    let items: Vec<&Heading> = ctx
        .headings
        .iter()
        .filter(|h| h.level == 2 || h.level == 3)
        .collect();
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!(
        "<nav class=\"outline\">\n  <div class=\"outline-title\">{}</div>\n  <ul>\n",
        html_escape(&ctx.theme.outline_title)
    );
    for heading in items {
        out.push_str(&format!(
            "    <li class=\"outline-h{}\"><a href=\"#{}\">{}</a></li>\n",
            heading.level,
            html_escape(&heading.id),
            html_escape(&heading.text)
        ));
    }
    out.push_str("  </ul>\n</nav>");
    out
}

/// Previous and next sidebar entries around the current route
pub fn prev_next<'t>(
    theme: &'t ResolvedTheme,
    route: &str,
) -> (Option<&'t SidebarItem>, Option<&'t SidebarItem>) {
    let items: Vec<&SidebarItem> = theme
        .sidebar_items()
        .filter(|i| !is_external(&i.link))
        .collect();
    match items.iter().position(|i| link_route(&i.link) == route) {
        Some(idx) => (
            idx.checked_sub(1).and_then(|p| items.get(p).copied()),
            items.get(idx + 1).copied(),
        ),
        None => (None, None),
    }
}

fn render_doc_footer(ctx: &PageContext<'_>) -> String {
    let clean = ctx.site.clean_urls;
    let mut out = String::from("<footer class=\"doc-footer\">\n");

    if let Some(edit) = &ctx.theme.edit_link {
        out.push_str(&format!(
            "  <a class=\"edit-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n",
            html_escape(&edit.url_for(ctx.relative)),
            html_escape(&edit.text)
        ));
    }

    if let Some(stamp) = ctx.last_updated {
        out.push_str(&format!(
            "  <p class=\"last-updated\">{}: <time>{}</time></p>\n",
            html_escape(&ctx.theme.last_updated_text),
            html_escape(stamp)
        ));
    }

    let (prev, next) = prev_next(ctx.theme, ctx.route);
    if prev.is_some() || next.is_some() {
        out.push_str("  <nav class=\"prev-next\">\n");
        if let Some(item) = prev {
            out.push_str(&format!(
                "    <a class=\"prev\" href=\"{}\"><span>{}</span>{}</a>\n",
                html_escape(&link_href(&item.link, clean)),
                html_escape(&ctx.theme.doc_footer.prev),
                html_escape(&item.text)
            ));
        }
        if let Some(item) = next {
            out.push_str(&format!(
                "    <a class=\"next\" href=\"{}\"><span>{}</span>{}</a>\n",
                html_escape(&link_href(&item.link, clean)),
                html_escape(&ctx.theme.doc_footer.next),
                html_escape(&item.text)
            ));
        }
        out.push_str("  </nav>\n");
    }

    out.push_str("</footer>");
    out
}

fn render_footer(ctx: &PageContext<'_>) -> String {
    let Some(footer) = &ctx.theme.footer else {
        return String::new();
    };
    let mut out = String::from("<footer class=\"footer\">\n");
    if let Some(message) = &footer.message {
        out.push_str(&format!("  <p class=\"footer-message\">{}</p>\n", html_escape(message)));
    }
    if let Some(copyright) = &footer.copyright {
        out.push_str(&format!(
            "  <p class=\"footer-copyright\">{}</p>\n",
            html_escape(copyright)
        ));
    }
    out.push_str("</footer>");
    out
}

const DEFAULT_CSS: &str = r#":root {
  --brand: #e8553a;
  --brand-soft: #fbe3dd;
  --text: #213547;
  --text-soft: #5c6b7a;
  --bg: #ffffff;
  --bg-soft: #f6f6f7;
  --border: #e2e2e3;
  --nav-height: 64px;
  --sidebar-width: 272px;
}
* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "PingFang SC", "Noto Sans SC", sans-serif;
  line-height: 1.7;
  color: var(--text);
  background: var(--bg);
}
a { color: var(--brand); text-decoration: none; }
a:hover { text-decoration: underline; }
.nav {
  position: sticky; top: 0; z-index: 10;
  display: flex; align-items: center; gap: 1.5rem;
  height: var(--nav-height); padding: 0 1.5rem;
  background: var(--bg); border-bottom: 1px solid var(--border);
}
.nav-title { display: flex; align-items: center; gap: .5rem; font-weight: 600; color: var(--text); }
.nav-logo { height: 28px; }
.nav-links { display: flex; gap: 1rem; margin-left: auto; }
.nav-link { color: var(--text); }
.nav-link.active { color: var(--brand); }
.locale-switch { display: flex; gap: .5rem; font-size: .9rem; }
.locale.current { font-weight: 600; color: var(--text); }
.search { position: relative; }
.search-input { padding: .3rem .6rem; border: 1px solid var(--border); border-radius: 6px; }
.search-results {
  position: absolute; right: 0; width: 320px; max-height: 60vh; overflow: auto;
  margin: .25rem 0 0; padding: 0; list-style: none; background: var(--bg);
  border: 1px solid var(--border); border-radius: 6px;
}
.search-results:empty { display: none; }
.search-results li { padding: .5rem .75rem; border-bottom: 1px solid var(--border); }
.layout-doc { display: grid; grid-template-columns: var(--sidebar-width) minmax(0, 1fr) 220px; grid-template-rows: auto 1fr auto; }
.layout-doc > .nav, .layout-doc > .footer { grid-column: 1 / -1; }
.sidebar { padding: 1.5rem; border-right: 1px solid var(--border); background: var(--bg-soft); }
.sidebar-title { font-size: .95rem; margin: 0 0 .5rem; }
.sidebar ul { list-style: none; margin: 0 0 1.5rem; padding: 0; }
.sidebar li a { display: block; padding: .2rem 0; color: var(--text-soft); }
.sidebar li a.active { color: var(--brand); font-weight: 600; }
.content { padding: 2rem 3rem; min-width: 0; }
.content-home { padding: 0; }
.outline { padding: 2rem 1rem; font-size: .85rem; }
.outline ul { list-style: none; padding: 0; }
.outline-h3 { padding-left: 1rem; }
.doc pre { padding: 1rem; overflow-x: auto; background: var(--bg-soft); border-radius: 8px; }
.doc code { font-size: .9em; }
.doc table { border-collapse: collapse; }
.doc th, .doc td { padding: .4rem .8rem; border: 1px solid var(--border); }
.doc-footer { margin-top: 3rem; padding-top: 1.5rem; border-top: 1px solid var(--border); }
.last-updated { color: var(--text-soft); font-size: .85rem; }
.prev-next { display: flex; justify-content: space-between; gap: 1rem; margin-top: 1rem; }
.prev-next a { display: flex; flex-direction: column; padding: .75rem 1rem; border: 1px solid var(--border); border-radius: 8px; }
.prev-next span { font-size: .75rem; color: var(--text-soft); }
.next { margin-left: auto; text-align: right; }
.footer { padding: 2rem; text-align: center; color: var(--text-soft); font-size: .85rem; border-top: 1px solid var(--border); }
.hero { display: flex; align-items: center; justify-content: space-between; gap: 2rem; max-width: 1152px; margin: 0 auto; padding: 4rem 2rem; }
.hero-name { font-size: 3.5rem; line-height: 1.1; margin: 0; color: var(--brand); }
.hero-text { font-size: 2.5rem; line-height: 1.2; margin: .5rem 0; font-weight: 700; }
.hero-tagline { font-size: 1.25rem; color: var(--text-soft); }
.hero-image { max-width: 320px; }
.hero-actions { display: flex; gap: 1rem; margin-top: 2rem; }
.action { padding: .6rem 1.4rem; border-radius: 20px; font-weight: 600; }
.action-brand { background: var(--brand); color: #fff; }
.action-alt { background: var(--bg-soft); color: var(--text); }
.features { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1rem; max-width: 1152px; margin: 0 auto; padding: 0 2rem 4rem; }
.feature { display: block; padding: 1.5rem; border-radius: 12px; background: var(--bg-soft); color: var(--text); }
.feature-icon { font-size: 2rem; }
.feature-title { font-size: 1.1rem; margin: .5rem 0; }
.feature-details { color: var(--text-soft); margin: 0; }
@media (max-width: 960px) {
  .layout-doc { display: block; }
  .sidebar, .outline { display: none; }
  .content { padding: 1.5rem; }
  .hero { flex-direction: column-reverse; text-align: center; }
}
"#;

const SEARCH_JS: &str = r#"(function () {
  var box = document.querySelector('.search');
  if (!box) return;
  var input = box.querySelector('.search-input');
  var list = box.querySelector('.search-results');
  var indexUrl = document.body.getAttribute('data-search-index');
  var docs = null;

  function load() {
    if (docs) return Promise.resolve(docs);
    return fetch(indexUrl).then(function (r) { return r.json(); }).then(function (index) {
      docs = index.documents || [];
      return docs;
    });
  }

  function render(query) {
    list.innerHTML = '';
    if (!query) return;
    var q = query.toLowerCase();
    var hits = docs.filter(function (d) {
      return d.title.toLowerCase().indexOf(q) !== -1 ||
        d.headings.join(' ').toLowerCase().indexOf(q) !== -1 ||
        d.text.toLowerCase().indexOf(q) !== -1;
    }).slice(0, 10);
    if (!hits.length) {
      var empty = document.createElement('li');
      empty.textContent = box.getAttribute('data-no-results');
      list.appendChild(empty);
      return;
    }
    hits.forEach(function (d) {
      var li = document.createElement('li');
      var a = document.createElement('a');
      a.href = d.route;
      a.textContent = d.title;
      li.appendChild(a);
      list.appendChild(li);
    });
  }

  input.addEventListener('input', function () {
    var query = input.value.trim();
    load().then(function () { render(query); });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use guide_kit_core::config::parse_guide_toml_str;
    use std::path::PathBuf;

    fn site() -> Site {
        let toml = r##"
title = "Clawdbot 中文指南"
clean_urls = true

[sitemap]
hostname = "https://example.org"

[theme_config]
logo = "/pixel-lobster.svg"
social_links = [{ icon = "github", link = "https://github.com/clawdbot/clawdbot" }]

[theme_config.edit_link]
pattern = "https://github.com/acme/guide/edit/main/docs/:path"

[theme_config.footer]
message = "Released under the MIT License."

[theme_config.search]
provider = "local"

[theme_config.search.locales.root]
placeholder = "搜索文档"

[locales.root]
label = "简体中文"
lang = "zh-CN"

[[locales.root.theme_config.sidebar]]
text = "教程"
items = [
  { text = "第一课", link = "/guide/intro" },
  { text = "第二课", link = "/guide/gateway" },
  { text = "第三课", link = "/guide/tools" },
]

[locales.en]
label = "English"
lang = "en-US"
"##;
        parse_guide_toml_str(toml, PathBuf::from(".")).unwrap()
    }

    fn render(theme: &dyn Theme, route: &str, relative: &str, layout: PageLayout) -> String {
        let site = site();
        let router = LocaleRouter::new(&site);
        let locale = router.resolve(route);
        let resolved = router.resolve_theme(&site, locale);
        let headings = vec![
            Heading {
                level: 2,
                text: "Install".to_string(),
                id: "install".to_string(),
            },
            Heading {
                level: 4,
                text: "Deep".to_string(),
                id: "deep".to_string(),
            },
        ];
        let app = AppRegistry::default();
        let ctx = PageContext {
            site: &site,
            router: &router,
            locale,
            theme: &resolved,
            route,
            relative,
            layout,
            head: "<title>t</title>",
            content: "<h1>Body</h1>",
            headings: &headings,
            last_updated: Some("2026-01-02 10:00"),
            app: &app,
        };
        theme.layout(&ctx)
    }

    #[test]
    fn test_doc_layout_chrome() {
        let html = render(&DefaultTheme, "/guide/gateway", "guide/gateway.md", PageLayout::Doc);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"zh-CN\">"));
        assert!(html.contains("<h1>Body</h1>"));
        assert!(html.contains("<aside class=\"sidebar\">"));
        assert!(html.contains("<li><a class=\"active\" href=\"/guide/gateway\">第二课</a></li>"));
        assert!(html.contains(
            "href=\"https://github.com/acme/guide/edit/main/docs/guide/gateway.md\""
        ));
        assert!(html.contains("<a class=\"prev\" href=\"/guide/intro\">"));
        assert!(html.contains("<a class=\"next\" href=\"/guide/tools\">"));
        assert!(html.contains("<time>2026-01-02 10:00</time>"));
        assert!(html.contains("<a href=\"#install\">Install</a>"));
        assert!(!html.contains("#deep"));
        assert!(html.contains("Released under the MIT License."));
        assert!(html.contains("placeholder=\"搜索文档\""));
        assert!(html.contains("data-search-index=\"/search/root.json\""));
    }

    #[test]
    fn test_locale_switcher_links() {
        let html = render(&DefaultTheme, "/guide/tools", "guide/tools.md", PageLayout::Doc);
        assert!(html.contains("lang=\"en-US\" href=\"/en/guide/tools\">English</a>"));
        assert!(html.contains("class=\"locale current\" lang=\"zh-CN\" href=\"/guide/tools\""));
    }

    #[test]
    fn test_home_layout_has_no_sidebar() {
        let html = render(&DefaultTheme, "/", "index.md", PageLayout::Home);
        assert!(!html.contains("class=\"sidebar\""));
        assert!(html.contains("layout-home"));
        assert!(html.contains("<script src=\"/assets/home.js\" defer></script>"));
    }

    #[test]
    fn test_custom_theme_adds_stylesheet_and_passes_layout_through() {
        let custom = CustomTheme::new(Some(b"body{}".to_vec()));
        assert_eq!(
            custom.stylesheets(),
            vec!["/assets/theme.css".to_string(), "/assets/style.css".to_string()]
        );
        assert!(custom.assets().iter().any(|(p, b)| p == CUSTOM_STYLESHEET && b == b"body{}"));

        let a = render(&custom, "/guide/intro", "guide/intro.md", PageLayout::Doc);
        let b = render(&DefaultTheme, "/guide/intro", "guide/intro.md", PageLayout::Doc);
        assert_eq!(a, b);
    }

    #[test]
    fn test_enhance_app_default_is_noop() {
        let mut app = AppRegistry::default();
        DefaultTheme.enhance_app(&mut app);
        CustomTheme::new(None).enhance_app(&mut app);
        assert!(app.scripts.is_empty());
        assert!(app.body_snippets.is_empty());
    }

    #[test]
    fn test_prev_next_edges() {
        let site = site();
        let router = LocaleRouter::new(&site);
        let theme = router.resolve_theme(&site, router.root());

        let (prev, next) = prev_next(&theme, "/guide/intro");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().text, "第二课");

        let (prev, next) = prev_next(&theme, "/guide/tools");
        assert_eq!(prev.unwrap().text, "第二课");
        assert!(next.is_none());

        assert_eq!(prev_next(&theme, "/elsewhere"), (None, None));
    }

    #[test]
    fn test_link_href() {
        assert_eq!(link_href("/guide/intro", true), "/guide/intro");
        assert_eq!(link_href("/guide/intro", false), "/guide/intro.html");
        assert_eq!(link_href("/guide/intro#a", false), "/guide/intro.html#a");
        assert_eq!(link_href("/en/", false), "/en/");
        assert_eq!(link_href("/pixel-lobster.svg", false), "/pixel-lobster.svg");
        assert_eq!(link_href("https://x.org/a", false), "https://x.org/a");
    }

    #[test]
    fn test_link_href_source_suffixes() {
        assert_eq!(link_href("/guide/intro.md", true), "/guide/intro");
        assert_eq!(link_href("/guide/intro.md", false), "/guide/intro.html");
        assert_eq!(link_href("/guide/intro.md#setup", false), "/guide/intro.html#setup");
        assert_eq!(link_href("/guide/intro.html", true), "/guide/intro");
        assert_eq!(link_href("/guide/index.md", false), "/guide/");
        assert_eq!(link_href("/index.md", true), "/");
        assert_eq!(link_href("/guide/myindex.md", false), "/guide/myindex.html");
    }

    #[test]
    fn test_sidebar_md_links_point_at_written_pages() {
        let mut site = site();
        let items = &mut site
            .locales
            .get_mut("root")
            .unwrap()
            .theme_config
            .sidebar
            .as_mut()
            .unwrap()[0]
            .items;
        items[0].link = "/guide/intro.md".to_string();

        let router = LocaleRouter::new(&site);
        let locale = router.resolve("/guide/gateway");
        let resolved = router.resolve_theme(&site, locale);
        let app = AppRegistry::default();
        let html = DefaultTheme.layout(&PageContext {
            site: &site,
            router: &router,
            locale,
            theme: &resolved,
            route: "/guide/gateway",
            relative: "guide/gateway.md",
            layout: PageLayout::Doc,
            head: "",
            content: "",
            headings: &[],
            last_updated: None,
            app: &app,
        });
        assert!(html.contains("<li><a href=\"/guide/intro\">第一课</a></li>"));
        assert!(html.contains("<a class=\"prev\" href=\"/guide/intro\">"));
        assert!(!html.contains("intro.md"));
    }

    #[test]
    fn test_nav_active_respects_segments() {
        assert!(nav_is_active("/guide/intro", "/guide/intro", "/"));
        assert!(nav_is_active("/guide", "/guide/intro", "/"));
        assert!(nav_is_active("/guide/", "/guide/intro", "/"));
        assert!(nav_is_active("/guide/intro.md", "/guide/intro", "/"));
        assert!(!nav_is_active("/guide/in", "/guide/intro", "/"));
        assert!(!nav_is_active("/", "/guide/intro", "/"));
        assert!(!nav_is_active("/en/", "/en/guide/intro", "/en/"));
        assert!(!nav_is_active("https://x.org/guide", "/guide/intro", "/"));
    }

    #[test]
    fn test_theme_for_selection() {
        let mut site = site();
        assert_eq!(theme_for(&site).unwrap().name(), "default");

        site.theme.layout = LayoutKind::Custom;
        assert_eq!(theme_for(&site).unwrap().name(), "custom");

        site.theme.stylesheet = Some(PathBuf::from("missing/style.css"));
        assert!(theme_for(&site).is_err());
    }
}
