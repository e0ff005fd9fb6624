//! Host page structure.
//!
//! A [`PageDocument`] is the static markup the behavior layer binds to: which
//! carousels exist and what controls they carry, the navigation bar, the
//! scroll-spied sections, modal dialogs, the contact form and copy buttons.
//! It is loaded from a TOML or JSON page description (chosen by extension).
//!
//! Every optional element is modelled explicitly (`prev = false`, `nav`
//! absent...) because the components must degrade to no-ops when a piece of
//! markup is missing.
//!
//! ```toml
//! [platform]
//! prefers_reduced_motion = false
//! viewport_height = 800
//!
//! [[carousels]]
//! id = "work"
//! autoplay = "true"
//! interval = "5000"
//!
//! [[carousels.slides]]
//! title = "Kitchen"
//! body = "A *full* renovation."
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Page validation error: {0}")]
    Validation(String),
}

fn yes() -> bool {
    true
}

fn default_viewport_height() -> f64 {
    800.0
}

/// The whole page as seen by the behavior layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageDocument {
    /// Document title, used by the HTML renderer.
    pub title: String,
    pub platform: Platform,
    pub carousels: Vec<CarouselMarkup>,
    pub nav: Option<NavMarkup>,
    /// `main section[id]` elements, in document order.
    pub sections: Vec<SectionMarkup>,
    pub modals: Vec<ModalMarkup>,
    pub form: Option<FormMarkup>,
    pub copy_buttons: Vec<CopyButtonMarkup>,
}

/// Platform signals sampled once when the page is wired up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Platform {
    /// `(prefers-reduced-motion: reduce)` media query result.
    pub prefers_reduced_motion: bool,
    /// Viewport height in CSS pixels.
    pub viewport_height: f64,
    /// Total document height. Derived from the sections when absent.
    pub page_height: Option<f64>,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            prefers_reduced_motion: false,
            viewport_height: default_viewport_height(),
            page_height: None,
        }
    }
}

/// One `[data-carousel]` container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselMarkup {
    pub id: String,
    /// Accessible label for the region.
    #[serde(default)]
    pub label: Option<String>,
    /// Whether a `[data-carousel-track]` element exists.
    #[serde(default = "yes")]
    pub track: bool,
    #[serde(default)]
    pub slides: Vec<SlideMarkup>,
    #[serde(default = "yes")]
    pub prev: bool,
    #[serde(default = "yes")]
    pub next: bool,
    /// Whether a `[data-carousel-dots]` host exists.
    #[serde(default = "yes")]
    pub dots: bool,
    /// Raw `data-autoplay` attribute.
    #[serde(default)]
    pub autoplay: Option<String>,
    /// Raw `data-interval` attribute.
    #[serde(default)]
    pub interval: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideMarkup {
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavMarkup {
    /// Whether `.nav__toggle` exists.
    #[serde(default = "yes")]
    pub toggle: bool,
    /// Whether `.nav__links` exists.
    #[serde(default = "yes")]
    pub panel: bool,
    #[serde(default)]
    pub links: Vec<NavLinkMarkup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLinkMarkup {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionMarkup {
    pub id: String,
    /// Offset from the top of the document, in CSS pixels.
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModalMarkup {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Ids of the focusable elements inside the dialog, in tab order.
    #[serde(default)]
    pub focusables: Vec<String>,
    #[serde(default)]
    pub printable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormMarkup {
    pub fields: Vec<FieldMarkup>,
    /// Whether a `button[type=submit]` exists.
    #[serde(default = "yes")]
    pub submit_button: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldMarkup {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyButtonMarkup {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Raw `data-copy` attribute.
    #[serde(default)]
    pub copy: String,
}

impl PageDocument {
    /// Load a page description. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let doc: PageDocument = if is_json {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Reject markup that could not exist in a real page: duplicate ids and
    /// nonsensical geometry. Missing optional elements are *not* errors.
    pub fn validate(&self) -> Result<(), DocumentError> {
        unique_ids("carousel", self.carousels.iter().map(|c| c.id.as_str()))?;
        unique_ids("modal", self.modals.iter().map(|m| m.id.as_str()))?;
        unique_ids("section", self.sections.iter().map(|s| s.id.as_str()))?;
        unique_ids("copy button", self.copy_buttons.iter().map(|b| b.id.as_str()))?;

        if self.platform.viewport_height <= 0.0 {
            return Err(DocumentError::Validation(
                "platform.viewport_height must be positive".into(),
            ));
        }
        for section in &self.sections {
            if section.id.is_empty() {
                return Err(DocumentError::Validation("section id must not be empty".into()));
            }
            if section.height < 0.0 || section.top < 0.0 {
                return Err(DocumentError::Validation(format!(
                    "section '{}' has negative geometry",
                    section.id
                )));
            }
        }
        Ok(())
    }

    /// Document height: explicit, or the bottom edge of the lowest section
    /// (never shorter than the viewport).
    pub fn page_height(&self) -> f64 {
        self.platform.page_height.unwrap_or_else(|| {
            self.sections
                .iter()
                .map(|s| s.top + s.height)
                .fold(self.platform.viewport_height, f64::max)
        })
    }
}

fn unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), DocumentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(DocumentError::Validation(format!("{kind} id must not be empty")));
        }
        if !seen.insert(id) {
            return Err(DocumentError::Validation(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}
