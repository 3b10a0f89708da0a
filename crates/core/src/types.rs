use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Key of the default locale in `[locales]`
pub const ROOT_LOCALE: &str = "root";

/// Complete site configuration, resolved from guide.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Directory containing guide.toml; every relative path hangs off it
    pub root: PathBuf,
    pub title: String,
    pub description: String,
    pub src_dir: PathBuf,
    pub out_dir: PathBuf,
    pub clean_urls: bool,
    pub last_updated: bool,
    pub sitemap: SitemapConfig,
    pub head: Vec<HeadTag>,
    pub theme: ThemeSettings,
    pub theme_config: ThemeConfig,
    /// Locale descriptors keyed by locale key (`root`, `en`, ...)
    pub locales: BTreeMap<String, LocaleConfig>,
}

impl Site {
    /// Absolute-ish path of the Markdown source tree
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.src_dir)
    }

    /// Default output directory for `build`
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.out_dir)
    }

    /// Configured hostname with no interpretation applied
    pub fn hostname(&self) -> &str {
        &self.sitemap.hostname
    }
}

/// Sitemap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Fully-qualified base URL, no trailing slash
    pub hostname: String,
}

/// A single `<head>` tag: `[tag, attrs]` or `[tag, attrs, content]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeadTag {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Which layout component renders pages
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Default,
    Custom,
}

/// Theme extension settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Global stylesheet, relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<PathBuf>,
    #[serde(default)]
    pub layout: LayoutKind,
}

/// Site-wide theme configuration; locales override parts of it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<EditLink>,
    #[serde(default)]
    pub nav: Vec<NavItem>,
    #[serde(default)]
    pub sidebar: Vec<SidebarGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_footer: Option<DocFooter>,
}

/// Per-locale overrides of [`ThemeConfig`]. `None` keeps the global value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav: Option<Vec<NavItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Vec<SidebarGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<EditLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_footer: Option<DocFooter>,
}

/// Locale descriptor as written under `[locales.<key>]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub label: String,
    pub lang: String,
    /// Link used by the language switcher; defaults to the locale prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub theme_config: LocaleThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavItem {
    pub text: String,
    pub link: String,
}

/// Named sidebar section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidebarGroup {
    pub text: String,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

/// Sidebar entry: display text and route link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidebarItem {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    pub icon: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Footer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Search provider settings. Only the local provider exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub provider: SearchProvider,
    /// Per-locale UI strings keyed by locale key
    #[serde(default)]
    pub locales: BTreeMap<String, SearchTranslations>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    #[default]
    Local,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchTranslations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_results_text: Option<String>,
}

/// "Edit this page" link; `:path` is replaced with the source path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditLink {
    pub pattern: String,
    #[serde(default = "default_edit_text")]
    pub text: String,
}

fn default_edit_text() -> String {
    "Edit this page".to_string()
}

impl EditLink {
    /// Substitute the page's source path into the pattern
    pub fn url_for(&self, relative_path: &str) -> String {
        self.pattern.replace(":path", relative_path)
    }
}

/// Labels of the previous/next page links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocFooter {
    pub prev: String,
    pub next: String,
}

impl Default for DocFooter {
    fn default() -> Self {
        Self {
            prev: "Previous page".to_string(),
            next: "Next page".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_link_substitutes_path() {
        let link = EditLink {
            pattern: "https://github.com/acme/guide/edit/main/docs/:path".to_string(),
            text: default_edit_text(),
        };
        assert_eq!(
            link.url_for("en/guide/gateway.md"),
            "https://github.com/acme/guide/edit/main/docs/en/guide/gateway.md"
        );
    }

    #[test]
    fn test_edit_link_without_placeholder_is_unchanged() {
        let link = EditLink {
            pattern: "https://example.com/edit".to_string(),
            text: default_edit_text(),
        };
        assert_eq!(link.url_for("guide/intro.md"), "https://example.com/edit");
    }
}
