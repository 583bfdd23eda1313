//! Build configuration
//!
//! One immutable [`RevealConfig`] value is passed into every stage. It is
//! loaded from TOML and validated before any tree is processed.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the only builder that renders slide decks
pub const SLIDES_TARGET: &str = "revealjs";

/// Depth whose sections get their own title slide when vertical slides are on
pub const VERTICAL_DEPTH: u32 = 2;

/// Top-level configuration
///
/// ```toml
/// break_on_transition = true
/// newslides_inherit_titles = true
/// break_depths = [2]
/// vertical_slides = true
/// theme = "solarized.css"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Turn transition markers into slide breaks
    pub break_on_transition: bool,
    /// Slide breaks inherit the title of the nearest real section
    pub newslides_inherit_titles: bool,
    /// Section depths hoisted to top-level slides
    pub break_depths: BTreeSet<u32>,
    /// Give depth-2 sections their own title slide
    pub vertical_slides: bool,
    /// Replace the root section by its children once its title is split off,
    /// so depth-2 sections become horizontal slides
    pub unwrap_root_section: bool,
    /// reveal.js theme stylesheet
    pub theme: String,
    /// Output target (builder name)
    pub target: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            break_on_transition: true,
            newslides_inherit_titles: true,
            break_depths: BTreeSet::new(),
            vertical_slides: true,
            unwrap_root_section: true,
            theme: "black.css".to_string(),
            target: SLIDES_TARGET.to_string(),
        }
    }
}

impl RevealConfig {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject out-of-range values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(&depth) = self.break_depths.iter().find(|&&d| d == 0) {
            return Err(ConfigError::InvalidBreakDepth { depth });
        }

        let theme = self.theme.as_str();
        let bare_name = !theme.contains(['/', '\\']) && !theme.starts_with('.');
        if !bare_name || !theme.ends_with(".css") || theme.len() <= ".css".len() {
            return Err(ConfigError::InvalidTheme {
                theme: self.theme.clone(),
            });
        }

        Ok(())
    }

    /// Output target derived from the configured builder name
    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::parse(&self.target)
    }
}

/// What the build produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A reveal.js slide deck
    Slides,
    /// Any other builder; slide-specific rewriting is skipped
    Document(String),
}

impl OutputTarget {
    /// Map a builder name to a target
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case(SLIDES_TARGET) {
            Self::Slides
        } else {
            Self::Document(name.to_string())
        }
    }

    pub fn is_slides(&self) -> bool {
        matches!(self, Self::Slides)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Slides => SLIDES_TARGET,
            Self::Document(name) => name,
        }
    }
}
