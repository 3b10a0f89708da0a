//! Scanning the Markdown source tree.

use crate::error::{Error, Result};
use crate::frontmatter::{Frontmatter, parse_document};
use crate::route::source_to_route;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Directory under the source tree that is copied verbatim, never rendered
pub const PUBLIC_DIR: &str = "public";

/// A Markdown source file found in the content tree
#[derive(Debug, Clone)]
pub struct SourcePage {
    /// Path relative to the source directory, `/`-separated
    pub relative: String,
    /// Route the page is served at
    pub route: String,
    /// Full path on disk
    pub path: PathBuf,
}

impl SourcePage {
    /// Read the document and split off its frontmatter
    pub fn load(&self) -> Result<LoadedPage> {
        let source = fs::read_to_string(&self.path)?;
        let (frontmatter, body) = parse_document(&source).map_err(|e| match e {
            Error::Frontmatter(msg) => Error::Frontmatter(format!("{}: {}", self.relative, msg)),
            other => other,
        })?;
        let modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        Ok(LoadedPage {
            frontmatter,
            body: body.to_string(),
            modified,
        })
    }
}

/// A source page's parsed contents
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub frontmatter: Frontmatter,
    pub body: String,
    pub modified: Option<SystemTime>,
}

/// Every Markdown page under the source directory, sorted by relative path
#[derive(Debug, Clone, Default)]
pub struct ContentTree {
    pub root: PathBuf,
    pub pages: Vec<SourcePage>,
}

impl ContentTree {
    /// Walk `src_dir` and collect every `.md` file.
    ///
    /// Hidden directories and the `public/` asset directory are skipped.
    pub fn scan<P: AsRef<Path>>(src_dir: P) -> Result<Self> {
        let root = src_dir.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::InvalidData(format!(
                "Source directory does not exist: {}",
                root.display()
            )));
        }

        let mut pages = Vec::new();
        let walker = WalkDir::new(&root).follow_links(true).into_iter();
        for entry in walker.filter_entry(|e| e.depth() == 0 || !is_skipped(e.path(), &root)) {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let relative = relative_slash_path(path, &root)?;
            tracing::trace!(page = %relative, "found source page");
            pages.push(SourcePage {
                route: source_to_route(&relative),
                relative,
                path: path.to_path_buf(),
            });
        }

        pages.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(Self { root, pages })
    }

    /// Set of relative paths, for existence checks
    pub fn relative_paths(&self) -> BTreeSet<&str> {
        self.pages.iter().map(|p| p.relative.as_str()).collect()
    }

    /// Whether a relative source path exists in the tree
    pub fn contains(&self, relative: &str) -> bool {
        self.pages.iter().any(|p| p.relative == relative)
    }

    /// Look up a page by route
    pub fn find_route(&self, route: &str) -> Option<&SourcePage> {
        self.pages.iter().find(|p| p.route == route)
    }

    /// Directory of verbatim-copied assets
    pub fn public_dir(&self) -> PathBuf {
        self.root.join(PUBLIC_DIR)
    }
}

fn is_skipped(path: &Path, root: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if name.starts_with('.') {
        return true;
    }
    path.is_dir() && path.parent() == Some(root) && name == PUBLIC_DIR
}

fn relative_slash_path(path: &Path, root: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| {
        Error::InvalidData(format!(
            "{} is outside the source directory",
            path.display()
        ))
    })?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_collects_markdown_sorted() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.md", "# Home");
        write(dir.path(), "guide/intro.md", "# Intro");
        write(dir.path(), "en/index.md", "# Home");
        write(dir.path(), "en/guide/intro.md", "# Intro");
        write(dir.path(), "guide/notes.txt", "not markdown");

        let tree = ContentTree::scan(dir.path()).unwrap();
        let rels: Vec<&str> = tree.pages.iter().map(|p| p.relative.as_str()).collect();
        assert_eq!(
            rels,
            vec!["en/guide/intro.md", "en/index.md", "guide/intro.md", "index.md"]
        );
        assert_eq!(tree.pages[0].route, "/en/guide/intro");
        assert_eq!(tree.pages[1].route, "/en/");
    }

    #[test]
    fn test_scan_skips_public_and_hidden() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.md", "# Home");
        write(dir.path(), "public/readme.md", "asset");
        write(dir.path(), ".vitepress/cache/x.md", "cache");
        write(dir.path(), "guide/public/kept.md", "nested public is content");

        let tree = ContentTree::scan(dir.path()).unwrap();
        assert!(tree.contains("index.md"));
        assert!(tree.contains("guide/public/kept.md"));
        assert!(!tree.contains("public/readme.md"));
        assert_eq!(tree.pages.len(), 2);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = ContentTree::scan(dir.path().join("nope"));
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_find_route_and_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "guide/tools.md", "---\ntitle: Tools\n---\n# Tools\n");

        let tree = ContentTree::scan(dir.path()).unwrap();
        let page = tree.find_route("/guide/tools").unwrap();
        let loaded = page.load().unwrap();
        assert_eq!(loaded.frontmatter.title.as_deref(), Some("Tools"));
        assert_eq!(loaded.body, "# Tools\n");
        assert!(loaded.modified.is_some());
    }

    #[test]
    fn test_load_reports_file_on_bad_frontmatter() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "guide/broken.md", "---\nlayout: nope\n---\n");

        let tree = ContentTree::scan(dir.path()).unwrap();
        let err = tree.pages[0].load().unwrap_err();
        assert!(err.to_string().contains("guide/broken.md"));
    }
}
