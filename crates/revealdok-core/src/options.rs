//! Slide directive options
//!
//! Sections, slide breaks and interslides may carry reveal.js options. They
//! are validated when the tree is loaded and stored as passthrough `data-*`
//! attributes that the translator copies onto the slide container.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use revealdok_ast::Attributes;

use crate::error::ConfigError;

/// Transition styles understood by reveal.js
pub const TRANSITIONS: &[&str] = &["none", "fade", "slide", "convex", "concave", "zoom"];

/// Transition speeds understood by reveal.js
pub const TRANSITION_SPEEDS: &[&str] = &["default", "fast", "slow"];

/// Validated slide options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideOptions {
    pub class: Vec<String>,
    pub background_color: Option<String>,
    pub background_image: Option<String>,
    pub transition: Option<String>,
    pub transition_speed: Option<String>,
}

impl SlideOptions {
    /// Parse raw directive options
    pub fn from_raw(raw: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        for (key, value) in raw {
            let value = value.trim();
            match key.as_str() {
                "class" => options.class = class_option(value)?,
                "background-color" => {
                    options.background_color = Some(css_color(key, value)?.to_string())
                }
                "background-image" => options.background_image = Some(uri(key, value)?.to_string()),
                "transition" => {
                    options.transition = Some(choice(key, value, TRANSITIONS)?.to_string())
                }
                "transition-speed" => {
                    options.transition_speed =
                        Some(choice(key, value, TRANSITION_SPEEDS)?.to_string())
                }
                _ => {
                    return Err(ConfigError::UnknownOption {
                        option: key.clone(),
                    })
                }
            }
        }

        Ok(options)
    }

    /// Store the options on a node's attributes
    pub fn apply(&self, attrs: &mut Attributes) {
        for class in &self.class {
            attrs.add_class(class.clone());
        }

        let pairs = [
            ("data-background-color", &self.background_color),
            ("data-background-image", &self.background_image),
            ("data-transition", &self.transition),
            ("data-transition-speed", &self.transition_speed),
        ];
        for (key, value) in pairs {
            if let Some(value) = value {
                attrs.set_data(key, value.clone());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn choice<'a>(option: &str, value: &'a str, allowed: &[&str]) -> Result<&'a str, ConfigError> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::invalid_option(
            option,
            value,
            format!("one of {}", allowed.join(", ")),
        ))
    }
}

/// Split a class list and normalise each name to a CSS identifier
fn class_option(value: &str) -> Result<Vec<String>, ConfigError> {
    value
        .split_whitespace()
        .map(|name| {
            let normalized = normalize_class(name);
            if normalized.is_empty() {
                Err(ConfigError::invalid_option(
                    "class",
                    name,
                    "a name containing letters or digits",
                ))
            } else {
                Ok(normalized)
            }
        })
        .collect()
}

fn normalize_class(name: &str) -> String {
    let lowered = name.to_lowercase();
    lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn css_color<'a>(option: &str, value: &'a str) -> Result<&'a str, ConfigError> {
    static HEX_RE: OnceLock<Regex> = OnceLock::new();
    static FUNC_RE: OnceLock<Regex> = OnceLock::new();
    static NAMED_RE: OnceLock<Regex> = OnceLock::new();

    let hex = HEX_RE.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
    });
    let func = FUNC_RE.get_or_init(|| {
        Regex::new(r"^(?:rgba?|hsla?)\(\s*[-+0-9.%deg]+(?:\s*[,/ ]\s*[-+0-9.%deg]+){2,3}\s*\)$")
            .unwrap()
    });
    let named = NAMED_RE.get_or_init(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

    if hex.is_match(value) || func.is_match(value) || named.is_match(value) {
        Ok(value)
    } else {
        Err(ConfigError::invalid_option(
            option,
            value,
            "a CSS colour (#hex, rgb(), hsl() or a colour name)",
        ))
    }
}

fn uri<'a>(option: &str, value: &'a str) -> Result<&'a str, ConfigError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        Err(ConfigError::invalid_option(
            option,
            value,
            "a URI without whitespace",
        ))
    } else {
        Ok(value)
    }
}
