use anyhow::Result;
use guide_kit_validator::{ValidationReport, validate_site};
use std::path::PathBuf;

use super::load_project;

pub async fn run(path: PathBuf) -> Result<()> {
    println!("Validating guide at: {}", path.display());

    let (site, content) = load_project(&path)?;
    println!("✓ guide.toml valid");
    println!("  Site: {}", site.title);
    println!("  Pages: {}", content.pages.len());
    println!();

    let report = validate_site(&site, &content);
    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✅ Validation passed");
    Ok(())
}

/// Print a report in the same shape for `validate` and `build`
pub fn print_report(report: &ValidationReport) {
    for line in &report.info {
        println!("  {}", line);
    }
    for warning in &report.warnings {
        eprintln!("   ⚠ Warning: {}", warning);
    }
    for error in &report.errors {
        eprintln!("   ✗ {}", error);
    }
}
