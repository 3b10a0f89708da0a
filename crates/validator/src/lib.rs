// Build-time integrity checks over the config and content tree

pub mod hostname;
pub mod links;
pub mod parity;

use guide_kit_core::{ContentTree, LocaleRouter, Site};

pub use hostname::{HostnameProblem, check_hostname};
pub use links::{BrokenLink, check_content_links, check_navigation};
pub use parity::{MissingTranslation, check_parity};

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    /// Errors abort the build; warnings do not
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every check against a loaded site and its content tree
pub fn validate_site(site: &Site, content: &ContentTree) -> ValidationReport {
    let mut report = ValidationReport::default();
    let router = LocaleRouter::new(site);

    for broken in check_navigation(site, content) {
        report.errors.push(broken.message());
    }

    for missing in check_parity(&router, content) {
        report.errors.push(missing.message());
    }

    match check_content_links(content) {
        Ok(broken) => {
            for link in broken {
                report.errors.push(link.message());
            }
        }
        Err(e) => report.errors.push(e.to_string()),
    }

    // A bad hostname only corrupts absolute URLs, it never stops the build
    if let Err(problem) = check_hostname(site.hostname()) {
        report.warnings.push(format!(
            "sitemap.hostname '{}': {}; sitemap and social meta URLs will be wrong",
            site.hostname(),
            problem
        ));
    }

    if let Some(sheet) = &site.theme.stylesheet
        && !site.root.join(sheet).is_file()
    {
        report
            .errors
            .push(format!("theme.stylesheet not found: {}", sheet.display()));
    }

    for locale in router.locales() {
        let count = content
            .pages
            .iter()
            .filter(|p| router.locale_for_source(&p.relative).key == locale.key)
            .count();
        report
            .info
            .push(format!("{} ({}): {} pages", locale.label, locale.lang, count));
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );

    report
}
