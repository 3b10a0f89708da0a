use anyhow::{Context, Result};
use guide_kit_core::CONFIG_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// Escape a string for a TOML basic string.
///
/// The config is written from a commented template rather than serialized,
/// so values are escaped by hand.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a new guide project.
///
/// Creates `guide.toml`, a homepage and one lesson in each locale,
/// `docs/public/` and a starter stylesheet. The directory is created if
/// missing; an existing `guide.toml` is never overwritten.
pub async fn run(path: PathBuf) -> Result<()> {
    println!("Initializing guide project: {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            CONFIG_FILE,
            config_path.display()
        );
    }

    fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let title = title_from_dir(&path);
    for (rel, content) in scaffold_files(&title) {
        write_new(&path, rel, &content)?;
    }
    fs::create_dir_all(path.join("docs/public"))?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── guide.toml                ← Site title, hostname, locales");
    println!("  ├── docs/");
    println!("  │   ├── index.md              ← Chinese homepage");
    println!("  │   ├── guide/getting-started.md");
    println!("  │   ├── en/index.md           ← English homepage");
    println!("  │   ├── en/guide/getting-started.md");
    println!("  │   └── public/               ← Copied verbatim");
    println!("  └── theme/style.css");

    println!("\nNext steps:");
    println!("  1. Set [sitemap] hostname in guide.toml");
    println!("  2. Add lessons under docs/guide/ and docs/en/guide/");
    println!("  3. Preview: guide-kit dev {}", path.display());

    Ok(())
}

/// Human-readable title from the project directory name
fn title_from_dir(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .replace(['_', '-'], " ");

    let words: Vec<String> = name
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect();

    if words.is_empty() {
        "My Guide".to_string()
    } else {
        words.join(" ")
    }
}

fn write_new(base: &Path, rel: &str, content: &str) -> Result<()> {
    let dst = base.join(rel);
    if dst.exists() {
        println!("   ⚠ Skipping existing {}", rel);
        return Ok(());
    }
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dst, content).with_context(|| format!("Failed to write {}", dst.display()))
}

fn scaffold_files(title: &str) -> Vec<(&'static str, String)> {
    vec![
        (CONFIG_FILE, guide_toml(title)),
        (
            "docs/index.md",
            format!(
                r#"---
layout: home
hero:
  name: {title}
  text: 中文指南
  tagline: 从这里开始
  actions:
    - text: 快速开始
      link: /guide/getting-started
features:
  - title: 双语
    details: 中文与英文内容一一对应
---
"#
            ),
        ),
        (
            "docs/guide/getting-started.md",
            "# 快速开始\n\n欢迎阅读本指南。\n\n## 下一步\n\n在 `docs/guide/` 下添加更多课程。\n".to_string(),
        ),
        (
            "docs/en/index.md",
            format!(
                r#"---
layout: home
hero:
  name: {title}
  text: The English guide
  tagline: Start here
  actions:
    - text: Get Started
      link: /en/guide/getting-started
features:
  - title: Bilingual
    details: Every Chinese page has an English twin
---
"#
            ),
        ),
        (
            "docs/en/guide/getting-started.md",
            "# Getting Started\n\nWelcome to the guide.\n\n## Next steps\n\nAdd more lessons under `docs/en/guide/`.\n".to_string(),
        ),
        ("theme/style.css", STARTER_CSS.to_string()),
    ]
}

fn guide_toml(title: &str) -> String {
    let title = toml_escape_string(title);
    format!(
        r##"# Site configuration for guide-kit

title = "{title}"
description = "{title}"
clean_urls = true
last_updated = true

[sitemap]
# Scheme and host, no trailing slash
hostname = "https://example.com"

[[head]]
tag = "meta"
attrs = {{ property = "og:site_name", content = "{title}" }}

[theme]
stylesheet = "theme/style.css"

[theme_config]
site_title = "{title}"

[theme_config.search]
provider = "local"

[theme_config.footer]
message = "Released under the MIT License."

[locales.root]
label = "简体中文"
lang = "zh-CN"

[locales.root.theme_config]
nav = [{{ text = "指南", link = "/guide/getting-started" }}]
outline_title = "本页目录"
last_updated_text = "最后更新"

[[locales.root.theme_config.sidebar]]
text = "入门"
items = [{{ text = "快速开始", link = "/guide/getting-started" }}]

[locales.en]
label = "English"
lang = "en-US"
link = "/en/"

[locales.en.theme_config]
nav = [{{ text = "Guide", link = "/en/guide/getting-started" }}]

[[locales.en.theme_config.sidebar]]
text = "Basics"
items = [{{ text = "Getting Started", link = "/en/guide/getting-started" }}]
"##
    )
}

const STARTER_CSS: &str = r#"/* Loaded after the default theme; override its variables here */
:root {
  --brand: #e8543f;
}
"#;
