use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file at the project root
pub const CONFIG_FILE: &str = "guide.toml";

/// Raw TOML configuration structure
/// This matches the guide.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_src_dir")]
    src_dir: String, // Convert to PathBuf
    #[serde(default = "default_out_dir")]
    out_dir: String, // Convert to PathBuf
    #[serde(default)]
    clean_urls: bool,
    #[serde(default)]
    last_updated: bool,
    sitemap: SitemapConfig,
    #[serde(default)]
    head: Vec<HeadTag>,
    #[serde(default)]
    theme: RawThemeSettings,
    #[serde(default)]
    theme_config: ThemeConfig,
    #[serde(default)]
    locales: BTreeMap<String, LocaleConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct RawThemeSettings {
    stylesheet: Option<String>, // Convert to PathBuf
    #[serde(default)]
    layout: LayoutKind,
}

fn default_src_dir() -> String {
    "docs".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

/// Parse guide.toml from a file path
///
/// The project root is taken to be the directory containing the file.
pub fn parse_guide_toml<P: AsRef<Path>>(path: P) -> Result<Site> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    parse_guide_toml_str(&content, root)
}

/// Load guide.toml from a project directory
pub fn load_site<P: AsRef<Path>>(project_dir: P) -> Result<Site> {
    let config_path = project_dir.as_ref().join(CONFIG_FILE);
    if !config_path.exists() {
        return Err(Error::ConfigParse(format!(
            "{} not found in {}",
            CONFIG_FILE,
            project_dir.as_ref().display()
        )));
    }
    parse_guide_toml(config_path)
}

/// Parse guide.toml from a string (useful for testing)
pub fn parse_guide_toml_str(content: &str, root: PathBuf) -> Result<Site> {
    let raw: RawConfig = toml::from_str(content)?;

    let src_dir = validate_path(&raw.src_dir, "src_dir")?;
    let out_dir = validate_path(&raw.out_dir, "out_dir")?;

    let stylesheet = if let Some(sheet) = raw.theme.stylesheet {
        Some(validate_path(&sheet, "theme.stylesheet")?)
    } else {
        None
    };

    validate_locales(&raw.locales)?;

    Ok(Site {
        root,
        title: raw.title,
        description: raw.description,
        src_dir,
        out_dir,
        clean_urls: raw.clean_urls,
        last_updated: raw.last_updated,
        sitemap: raw.sitemap,
        head: raw.head,
        theme: ThemeSettings {
            stylesheet,
            layout: raw.theme.layout,
        },
        theme_config: raw.theme_config,
        locales: raw.locales,
    })
}

/// Check the locale map describes exactly one root plus single-segment prefixes.
///
/// A key containing `/` would nest one locale's routes inside another's and
/// make prefix matching ambiguous, so it is rejected here rather than left
/// to undefined routing.
fn validate_locales(locales: &BTreeMap<String, LocaleConfig>) -> Result<()> {
    if !locales.contains_key(ROOT_LOCALE) {
        return Err(Error::ConfigParse(
            "Missing [locales.root]: the default locale is required".to_string(),
        ));
    }

    for (key, locale) in locales {
        if key == ROOT_LOCALE {
            continue;
        }
        if key.trim().is_empty() || key.contains('/') || key.contains(char::is_whitespace) {
            return Err(Error::ConfigParse(format!(
                "Locale key '{}' must be a single path segment",
                key
            )));
        }
        if let Some(link) = &locale.link
            && !link.starts_with('/')
        {
            return Err(Error::ConfigParse(format!(
                "Locale '{}' link must start with '/': '{}'",
                key, link
            )));
        }
    }

    Ok(())
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths, parent directory references (`..`) and empty
/// strings, so a guide.toml can never point outside its project directory.
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
title = "Clawdbot 中文指南"

[sitemap]
hostname = "https://clawdbot-guide.com"

[locales.root]
label = "简体中文"
lang = "zh-CN"
"##;

    #[test]
    fn test_parse_minimal_config() {
        let site = parse_guide_toml_str(MINIMAL, PathBuf::from("/tmp/site")).unwrap();
        assert_eq!(site.title, "Clawdbot 中文指南");
        assert_eq!(site.src_dir, PathBuf::from("docs"));
        assert_eq!(site.out_dir, PathBuf::from("dist"));
        assert!(!site.clean_urls);
        assert!(!site.last_updated);
        assert_eq!(site.hostname(), "https://clawdbot-guide.com");
        assert_eq!(site.theme.layout, LayoutKind::Default);
        assert_eq!(site.source_dir(), PathBuf::from("/tmp/site/docs"));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r##"
title = "Clawdbot 中文指南"
description = "从零开始"
clean_urls = true
last_updated = true

[sitemap]
hostname = "https://clawdbot-guide.com"

[[head]]
tag = "meta"
attrs = { property = "og:image", content = "{hostname}/pixel-lobster.svg" }

[[head]]
tag = "link"
attrs = { rel = "icon", href = "/pixel-lobster.svg" }

[theme]
stylesheet = "theme/style.css"
layout = "custom"

[theme_config]
logo = "/pixel-lobster.svg"
site_title = "Clawdbot Guide"
social_links = [{ icon = "github", link = "https://github.com/clawdbot/clawdbot" }]

[theme_config.edit_link]
pattern = "https://github.com/acme/guide/edit/main/docs/:path"

[theme_config.search]
provider = "local"

[locales.root]
label = "简体中文"
lang = "zh-CN"

[locales.root.theme_config]
nav = [{ text = "首页", link = "/" }]

[[locales.root.theme_config.sidebar]]
text = "教程"
items = [{ text = "简介", link = "/guide/intro" }]

[locales.en]
label = "English"
lang = "en-US"
link = "/en/"
title = "Clawdbot Guide"
"##;

        let site = parse_guide_toml_str(toml, PathBuf::from(".")).unwrap();
        assert!(site.clean_urls);
        assert_eq!(site.head.len(), 2);
        assert_eq!(
            site.head[0].attrs.get("content").map(String::as_str),
            Some("{hostname}/pixel-lobster.svg")
        );
        assert_eq!(site.theme.layout, LayoutKind::Custom);
        assert_eq!(
            site.theme.stylesheet,
            Some(PathBuf::from("theme/style.css"))
        );
        assert_eq!(site.theme_config.social_links.len(), 1);
        assert_eq!(
            site.theme_config.edit_link.as_ref().unwrap().text,
            "Edit this page"
        );
        assert_eq!(site.locales.len(), 2);
        let root = &site.locales["root"];
        assert_eq!(root.theme_config.sidebar.as_ref().unwrap()[0].items.len(), 1);
        assert_eq!(site.locales["en"].link.as_deref(), Some("/en/"));
    }

    #[test]
    fn test_parse_config_requires_root_locale() {
        let toml = r##"
title = "Guide"

[sitemap]
hostname = "https://example.org"

[locales.en]
label = "English"
lang = "en-US"
"##;
        let result = parse_guide_toml_str(toml, PathBuf::from("."));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("locales.root"));
    }

    #[test]
    fn test_parse_config_rejects_nested_locale_key() {
        let toml = r##"
title = "Guide"

[sitemap]
hostname = "https://example.org"

[locales.root]
label = "中文"
lang = "zh-CN"

[locales."en/us"]
label = "English"
lang = "en-US"
"##;
        let result = parse_guide_toml_str(toml, PathBuf::from("."));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("single path segment")
        );
    }

    #[test]
    fn test_parse_config_rejects_relative_locale_link() {
        let toml = r##"
title = "Guide"

[sitemap]
hostname = "https://example.org"

[locales.root]
label = "中文"
lang = "zh-CN"

[locales.en]
label = "English"
lang = "en-US"
link = "en/"
"##;
        let result = parse_guide_toml_str(toml, PathBuf::from("."));
        assert!(result.unwrap_err().to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_parse_config_keeps_malformed_hostname() {
        // Hostname format is a validation warning, never a parse failure
        let toml = MINIMAL.replace("https://clawdbot-guide.com", "your-actual-domain.com");
        let site = parse_guide_toml_str(&toml, PathBuf::from(".")).unwrap();
        assert_eq!(site.hostname(), "your-actual-domain.com");
    }

    #[test]
    fn test_parse_config_rejects_path_traversal_in_src_dir() {
        let toml = format!("src_dir = \"../elsewhere\"\n{}", MINIMAL);
        let result = parse_guide_toml_str(&toml, PathBuf::from("."));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Parent directory references")
        );
    }

    #[test]
    fn test_parse_config_rejects_absolute_out_dir() {
        let toml = format!("out_dir = \"/var/www\"\n{}", MINIMAL);
        let result = parse_guide_toml_str(&toml, PathBuf::from("."));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Absolute paths not allowed")
        );
    }

    #[test]
    fn test_validate_path_valid_relative() {
        assert!(validate_path("docs", "src_dir").is_ok());
        assert!(validate_path("theme/style.css", "theme.stylesheet").is_ok());
        assert!(validate_path("build/site", "out_dir").is_ok());
    }

    #[test]
    fn test_validate_path_rejects_empty() {
        let result = validate_path("   ", "out_dir");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Empty path"));
    }

    #[test]
    fn test_validate_path_field_name_in_error() {
        let result = validate_path("../secret.css", "theme.stylesheet");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("theme.stylesheet")
        );
    }

    #[test]
    fn test_load_site_missing_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_site(dir.path());
        assert!(result.unwrap_err().to_string().contains("guide.toml not found"));
    }

    #[test]
    fn test_load_site_sets_root() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), MINIMAL).unwrap();
        let site = load_site(dir.path()).unwrap();
        assert_eq!(site.root, dir.path());
    }
}
