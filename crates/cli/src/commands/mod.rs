pub mod build;
pub mod dev;
pub mod init;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};
use guide_kit_core::{CONFIG_FILE, ContentTree, Site, load_site};
use std::path::Path;

/// Load guide.toml and scan the content tree of a project directory
pub(crate) fn load_project(path: &Path) -> Result<(Site, ContentTree)> {
    if !path.exists() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }
    if !path.join(CONFIG_FILE).exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'guide-kit init {}' first",
            CONFIG_FILE,
            path.display(),
            path.display()
        );
    }

    let site = load_site(path).with_context(|| format!("Failed to load {}", CONFIG_FILE))?;
    let content = ContentTree::scan(site.source_dir()).with_context(|| {
        format!("Failed to scan content in {}", site.source_dir().display())
    })?;
    Ok((site, content))
}
