//! Locale parity: every page exists in every locale at the same relative path.

use guide_kit_core::{ContentTree, LocaleRouter};
use std::collections::{BTreeMap, BTreeSet};

/// A page present in one locale but absent from another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslation {
    /// Locale-relative path, e.g. `guide/gateway.md`
    pub page: String,
    pub present_in: String,
    pub missing_in: String,
    /// Source path the counterpart should exist at
    pub expected: String,
}

impl MissingTranslation {
    pub fn message(&self) -> String {
        format!(
            "{} exists in locale '{}' but {} is missing (locale '{}')",
            self.page, self.present_in, self.expected, self.missing_in
        )
    }
}

/// Compare the root tree against each other locale, both directions
pub fn check_parity(router: &LocaleRouter, content: &ContentTree) -> Vec<MissingTranslation> {
    let mut by_locale: BTreeMap<&str, BTreeSet<&str>> = router
        .locales()
        .iter()
        .map(|l| (l.key.as_str(), BTreeSet::new()))
        .collect();

    for page in &content.pages {
        let (locale, rest) = router.split_source(&page.relative);
        if let Some(set) = by_locale.get_mut(locale.key.as_str()) {
            set.insert(rest);
        }
    }

    let root = router.root();
    let root_pages = &by_locale[root.key.as_str()];
    let mut missing = Vec::new();

    for locale in router.locales().iter().filter(|l| !l.is_root()) {
        let pages = &by_locale[locale.key.as_str()];

        for page in root_pages.difference(pages) {
            missing.push(MissingTranslation {
                page: page.to_string(),
                present_in: root.key.clone(),
                missing_in: locale.key.clone(),
                expected: format!("{}/{}", locale.source_dir(), page),
            });
        }
        for page in pages.difference(root_pages) {
            missing.push(MissingTranslation {
                page: page.to_string(),
                present_in: locale.key.clone(),
                missing_in: root.key.clone(),
                expected: page.to_string(),
            });
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_kit_core::config::parse_guide_toml_str;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn router() -> LocaleRouter {
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
"##;
        LocaleRouter::new(&parse_guide_toml_str(toml, PathBuf::from(".")).unwrap())
    }

    fn tree(files: &[&str]) -> (TempDir, ContentTree) {
        let dir = TempDir::new().unwrap();
        for rel in files {
            let path: &Path = &dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "# page").unwrap();
        }
        let tree = ContentTree::scan(dir.path()).unwrap();
        (dir, tree)
    }

    #[test]
    fn test_parity_holds() {
        let (_dir, content) = tree(&[
            "index.md",
            "guide/gateway.md",
            "en/index.md",
            "en/guide/gateway.md",
        ]);
        assert!(check_parity(&router(), &content).is_empty());
    }

    #[test]
    fn test_missing_english_page() {
        let (_dir, content) = tree(&["index.md", "guide/gateway.md", "en/index.md"]);
        let missing = check_parity(&router(), &content);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].page, "guide/gateway.md");
        assert_eq!(missing[0].missing_in, "en");
        assert_eq!(missing[0].expected, "en/guide/gateway.md");
        assert!(missing[0].message().contains("en/guide/gateway.md"));
    }

    #[test]
    fn test_missing_root_page() {
        let (_dir, content) = tree(&["index.md", "en/index.md", "en/guide/extra.md"]);
        let missing = check_parity(&router(), &content);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].present_in, "en");
        assert_eq!(missing[0].missing_in, "root");
        assert_eq!(missing[0].expected, "guide/extra.md");
    }
}
