//! Homepage render modules.
//!
//! A `layout: home` page is emitted as an empty wrapper element plus its
//! frontmatter serialized as JSON. The hero and feature sections are drawn
//! client-side by `home.js` from that payload.

use crate::escape::escape_script_json;
use crate::theme::link_href;
use guide_kit_core::Frontmatter;
use serde::Serialize;

/// Output path of the hydration script
pub const HOME_SCRIPT: &str = "assets/home.js";

/// Static page data of one homepage
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub relative_path: String,
    pub title: String,
    pub description: String,
    pub frontmatter: Frontmatter,
}

impl HomePage {
    /// Hero action and feature links in the payload are rewritten to the
    /// hrefs pages are written at; the source frontmatter is left alone.
    pub fn new(
        relative_path: &str,
        title: &str,
        description: &str,
        frontmatter: &Frontmatter,
        clean_urls: bool,
    ) -> Self {
        let mut frontmatter = frontmatter.clone();
        if let Some(hero) = &mut frontmatter.hero {
            for action in &mut hero.actions {
                action.link = link_href(&action.link, clean_urls);
            }
        }
        for feature in &mut frontmatter.features {
            if let Some(link) = &mut feature.link {
                *link = link_href(link, clean_urls);
            }
        }

        Self {
            relative_path: relative_path.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            frontmatter,
        }
    }

    /// Page data as JSON
    pub fn page_data(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Markup for the page body. Always the same wrapper; only the payload varies.
    pub fn render(&self) -> String {
        let data = match self.page_data() {
            Ok(data) => data.to_string(),
            Err(e) => {
                tracing::warn!(page = %self.relative_path, error = %e, "homepage data not serializable");
                "null".to_string()
            }
        };
        let payload = escape_script_json(&data);
        format!(
            "<div id=\"home\" class=\"home\"></div>\n<script type=\"application/json\" id=\"page-data\">{}</script>",
            payload
        )
    }
}

/// Client-side renderer for the homepage payload
pub fn home_script() -> &'static str {
    r#"(function () {
  var dataEl = document.getElementById('page-data');
  var root = document.getElementById('home');
  if (!dataEl || !root) return;
  var page = JSON.parse(dataEl.textContent);
  var fm = page.frontmatter || {};

  function el(tag, cls, text) {
    var node = document.createElement(tag);
    if (cls) node.className = cls;
    if (text) node.textContent = text;
    return node;
  }

  var hero = fm.hero;
  if (hero) {
    var section = el('section', 'hero');
    var copy = el('div', 'hero-copy');
    if (hero.name) copy.appendChild(el('h1', 'hero-name', hero.name));
    if (hero.text) copy.appendChild(el('p', 'hero-text', hero.text));
    if (hero.tagline) copy.appendChild(el('p', 'hero-tagline', hero.tagline));
    if (hero.actions && hero.actions.length) {
      var actions = el('div', 'hero-actions');
      hero.actions.forEach(function (action) {
        var link = el('a', 'action action-' + (action.theme || 'brand'), action.text);
        link.href = action.link;
        actions.appendChild(link);
      });
      copy.appendChild(actions);
    }
    section.appendChild(copy);
    if (hero.image && hero.image.src) {
      var img = el('img', 'hero-image');
      img.src = hero.image.src;
      img.alt = hero.image.alt || '';
      section.appendChild(img);
    }
    root.appendChild(section);
  }

  if (fm.features && fm.features.length) {
    var grid = el('section', 'features');
    fm.features.forEach(function (feature) {
      var card = el(feature.link ? 'a' : 'div', 'feature');
      if (feature.link) card.href = feature.link;
      if (feature.icon) card.appendChild(el('div', 'feature-icon', feature.icon));
      card.appendChild(el('h2', 'feature-title', feature.title));
      card.appendChild(el('p', 'feature-details', feature.details));
      grid.appendChild(card);
    });
    root.appendChild(grid);
  }
})();
"#
}
