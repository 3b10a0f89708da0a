use anyhow::{Context, Result};
use guide_kit_generator::{generate_site, write_site};
use guide_kit_validator::validate_site;
use std::path::PathBuf;

use super::load_project;
use super::validate::print_report;

/// Build the static site
pub async fn run(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("🔨 Building static site...");

    let (site, content) = load_project(&path)?;
    let output = output.unwrap_or_else(|| site.output_dir());

    println!("   Source: {}", site.source_dir().display());
    println!("   Output: {}", output.display());
    println!();

    println!("✓ Loaded: {}", site.title);
    println!("  Locales: {}", site.locales.len());
    println!("  Pages: {}", content.pages.len());
    println!();

    println!("🔍 Validating...");
    let report = validate_site(&site, &content);
    print_report(&report);
    if !report.is_ok() {
        anyhow::bail!(
            "Build aborted: validation failed with {} error(s)",
            report.errors.len()
        );
    }
    println!("   ✓ Validation passed");

    println!("📄 Rendering pages...");
    let generated = generate_site(&site, &content).context("Failed to generate site")?;
    println!("   ✓ Rendered {} pages", generated.pages.len());

    println!("📁 Writing output...");
    let stats = write_site(&generated, &output, Some(&content.public_dir()))
        .context("Failed to write site")?;
    println!("   ✓ Wrote {} pages", stats.pages);
    println!("   ✓ Wrote {} generated assets", stats.assets);
    println!("   ✓ Copied {} public files", stats.public_files);

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   guide-kit preview {}", output.display());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_scaffolded_project() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("guide");
        crate::commands::init::run(project.clone()).await.unwrap();

        run(project.clone(), None).await.unwrap();

        let out = project.join("dist");
        assert!(out.join("index.html").is_file());
        assert!(out.join("en/index.html").is_file());
        assert!(out.join("guide/getting-started.html").is_file());
        assert!(out.join("en/guide/getting-started.html").is_file());
        assert!(out.join("sitemap.xml").is_file());
        assert!(out.join("search/root.json").is_file());
        assert!(out.join("assets/style.css").is_file());
    }

    #[tokio::test]
    async fn test_build_aborts_on_validation_error() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("guide");
        crate::commands::init::run(project.clone()).await.unwrap();
        // break locale parity
        fs::remove_file(project.join("docs/en/guide/getting-started.md")).unwrap();

        let out = dir.path().join("out");
        let err = run(project, Some(out.clone())).await.unwrap_err();
        assert!(err.to_string().contains("validation failed"));
        assert!(!out.exists());
    }
}
