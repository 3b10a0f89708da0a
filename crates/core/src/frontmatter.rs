//! YAML frontmatter at the top of content documents.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Page layout kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    /// Documentation page with sidebar and outline
    #[default]
    Doc,
    /// Homepage: hero and feature cards, hydrated client-side
    Home,
    /// Bare page: content only
    Page,
}

/// Per-document metadata block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub layout: PageLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
    /// Keys this generator does not interpret, kept for the page payload
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<HeroImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<HeroAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroAction {
    #[serde(default = "default_action_theme")]
    pub theme: String,
    pub text: String,
    pub link: String,
}

fn default_action_theme() -> String {
    "brand".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub title: String,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Split a document into frontmatter and Markdown body
///
/// Documents without a leading `---` line get default frontmatter and are
/// returned whole as the body. An opening fence without a closing one is
/// an error.
pub fn parse_document(source: &str) -> Result<(Frontmatter, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return Ok((Frontmatter::default(), source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let frontmatter = if yaml.trim().is_empty() {
                Frontmatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((frontmatter, body));
        }
        offset += line.len();
    }

    Err(Error::Frontmatter(
        "unterminated frontmatter block (missing closing '---')".to_string(),
    ))
}
