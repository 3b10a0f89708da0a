//! Locale routing and per-locale theme resolution.
//!
//! The default locale (`root`) owns every route that does not start with
//! another locale's key. Non-default locales prefix every route with
//! `/<key>`.

use crate::types::*;

/// A resolved language variant of the site
#[derive(Debug, Clone)]
pub struct Locale {
    pub key: String,
    pub lang: String,
    pub label: String,
    /// `""` for root, `/<key>` otherwise
    pub prefix: String,
    /// Language switcher target
    pub link: String,
    pub title: String,
    pub description: String,
    pub overrides: LocaleThemeConfig,
}

impl Locale {
    pub fn is_root(&self) -> bool {
        self.key == ROOT_LOCALE
    }

    /// Directory under the source tree holding this locale's pages
    pub fn source_dir(&self) -> &str {
        if self.is_root() { "" } else { &self.key }
    }
}

/// Theme configuration after applying one locale's overrides
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    pub logo: Option<String>,
    pub site_title: String,
    pub social_links: Vec<SocialLink>,
    pub footer: Option<Footer>,
    pub search: Option<SearchConfig>,
    pub edit_link: Option<EditLink>,
    pub nav: Vec<NavItem>,
    pub sidebar: Vec<SidebarGroup>,
    pub outline_title: String,
    pub last_updated_text: String,
    pub doc_footer: DocFooter,
}

impl ResolvedTheme {
    /// Sidebar entries flattened in display order
    pub fn sidebar_items(&self) -> impl Iterator<Item = &SidebarItem> {
        self.sidebar.iter().flat_map(|g| g.items.iter())
    }
}

/// Maps routes to locales
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    /// Root first, then the other locales in key order
    locales: Vec<Locale>,
}

impl LocaleRouter {
    pub fn new(site: &Site) -> Self {
        let mut locales: Vec<Locale> = site
            .locales
            .iter()
            .map(|(key, config)| {
                let prefix = if key == ROOT_LOCALE {
                    String::new()
                } else {
                    format!("/{}", key)
                };
                Locale {
                    key: key.clone(),
                    lang: config.lang.clone(),
                    label: config.label.clone(),
                    link: config
                        .link
                        .clone()
                        .unwrap_or_else(|| format!("{}/", prefix)),
                    prefix,
                    title: config.title.clone().unwrap_or_else(|| site.title.clone()),
                    description: config
                        .description
                        .clone()
                        .unwrap_or_else(|| site.description.clone()),
                    overrides: config.theme_config.clone(),
                }
            })
            .collect();
        locales.sort_by_key(|l| !l.is_root());
        Self { locales }
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn root(&self) -> &Locale {
        &self.locales[0]
    }

    pub fn get(&self, key: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.key == key)
    }

    /// Select the locale serving a route.
    ///
    /// The leading path segment is compared against each non-root key; no
    /// match means the root locale.
    pub fn resolve(&self, route: &str) -> &Locale {
        let first = route
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default();
        self.match_segment(first)
    }

    /// Select the locale owning a relative source path such as `en/guide/intro.md`
    pub fn locale_for_source(&self, relative: &str) -> &Locale {
        match relative.split_once('/') {
            Some((first, _)) => self.match_segment(first),
            None => self.root(),
        }
    }

    /// Split a relative source path into its locale and the locale-relative rest
    pub fn split_source<'a>(&self, relative: &'a str) -> (&Locale, &'a str) {
        let locale = self.locale_for_source(relative);
        if locale.is_root() {
            (locale, relative)
        } else {
            let rest = &relative[locale.key.len() + 1..];
            (locale, rest)
        }
    }

    /// Route of the same page in another locale
    pub fn alternate_route(&self, route: &str, target: &Locale) -> String {
        let current = self.resolve(route);
        let rest = route.strip_prefix(current.prefix.as_str()).unwrap_or(route);
        let rest = if rest.is_empty() { "/" } else { rest };
        format!("{}{}", target.prefix, rest)
    }

    /// Merge the global theme config with a locale's overrides
    pub fn resolve_theme(&self, site: &Site, locale: &Locale) -> ResolvedTheme {
        let global = &site.theme_config;
        let local = &locale.overrides;
        ResolvedTheme {
            logo: global.logo.clone(),
            site_title: local
                .site_title
                .clone()
                .or_else(|| global.site_title.clone())
                .unwrap_or_else(|| locale.title.clone()),
            social_links: global.social_links.clone(),
            footer: local.footer.clone().or_else(|| global.footer.clone()),
            search: global.search.clone(),
            edit_link: local.edit_link.clone().or_else(|| global.edit_link.clone()),
            nav: local.nav.clone().unwrap_or_else(|| global.nav.clone()),
            sidebar: local
                .sidebar
                .clone()
                .unwrap_or_else(|| global.sidebar.clone()),
            outline_title: local
                .outline_title
                .clone()
                .or_else(|| global.outline_title.clone())
                .unwrap_or_else(|| "On this page".to_string()),
            last_updated_text: local
                .last_updated_text
                .clone()
                .or_else(|| global.last_updated_text.clone())
                .unwrap_or_else(|| "Last updated".to_string()),
            doc_footer: local
                .doc_footer
                .clone()
                .or_else(|| global.doc_footer.clone())
                .unwrap_or_default(),
        }
    }

    fn match_segment(&self, segment: &str) -> &Locale {
        self.locales
            .iter()
            .find(|l| !l.is_root() && l.key == segment)
            .unwrap_or_else(|| self.root())
    }
}
