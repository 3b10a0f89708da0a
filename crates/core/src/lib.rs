pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod locale;
pub mod route;
pub mod types;

pub use config::{CONFIG_FILE, load_site, parse_guide_toml};
pub use content::{ContentTree, LoadedPage, SourcePage};
pub use error::{Error, Result};
pub use frontmatter::{Frontmatter, PageLayout};
pub use locale::{Locale, LocaleRouter, ResolvedTheme};
pub use types::*;
