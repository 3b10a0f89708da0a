use std::fmt;

/// Why a configured hostname cannot prefix absolute URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostnameProblem {
    Empty,
    Whitespace,
    MissingScheme,
    EmptyHost,
    InvalidHost(String),
    TrailingSlash,
}

impl fmt::Display for HostnameProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostnameProblem::Empty => write!(f, "hostname is empty"),
            HostnameProblem::Whitespace => write!(f, "hostname contains whitespace"),
            HostnameProblem::MissingScheme => {
                write!(f, "hostname must start with http:// or https://")
            }
            HostnameProblem::EmptyHost => write!(f, "hostname has no host after the scheme"),
            HostnameProblem::InvalidHost(host) => {
                write!(f, "hostname has an invalid host '{}'", host)
            }
            HostnameProblem::TrailingSlash => write!(f, "hostname must not end with '/'"),
        }
    }
}

/// Check a hostname is a fully-qualified URL with no trailing slash.
///
/// `https://clawdbot-guide.com` passes; `https://clawdbot-guide.com/` and
/// `your-actual-domain.com` do not. A base path such as
/// `https://example.org/docs` is accepted.
pub fn check_hostname(hostname: &str) -> Result<(), HostnameProblem> {
    if hostname.is_empty() {
        return Err(HostnameProblem::Empty);
    }
    if hostname.contains(char::is_whitespace) {
        return Err(HostnameProblem::Whitespace);
    }

    let rest = hostname
        .strip_prefix("https://")
        .or_else(|| hostname.strip_prefix("http://"))
        .ok_or(HostnameProblem::MissingScheme)?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(HostnameProblem::EmptyHost);
    }
    let valid_host = host
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | ':' | '[' | ']'));
    if !valid_host || host.starts_with('.') || host.ends_with('.') {
        return Err(HostnameProblem::InvalidHost(host.to_string()));
    }

    if hostname.ends_with('/') {
        return Err(HostnameProblem::TrailingSlash);
    }

    Ok(())
}
