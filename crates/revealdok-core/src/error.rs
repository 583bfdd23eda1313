//! Error types for slide transforms and configuration.

use revealdok_ast::{NodeId, TreeError};
use thiserror::Error;

/// Result type for revealdok operations
pub type Result<T> = std::result::Result<T, RevealError>;

/// Errors that abort a slide build
#[derive(Error, Debug)]
pub enum RevealError {
    /// A slide break that is not a direct child of a section
    #[error("Slide break {node:?} is not a direct child of a section")]
    OrphanSlideBreak { node: NodeId },

    /// A section without a title as its first child
    #[error("Section {node:?} has no title as its first child")]
    MissingTitle { node: NodeId },

    /// Walking back for an inherited title ran out of sections
    #[error("No titled section precedes {node:?} to inherit a title from")]
    NoTitleSource { node: NodeId },

    /// Tree surgery failed
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Configuration or slide option rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RevealError {
    /// Create a missing title error
    pub fn missing_title(node: NodeId) -> Self {
        Self::MissingTitle { node }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::OrphanSlideBreak { .. } => "REVEAL001",
            Self::MissingTitle { .. } => "REVEAL002",
            Self::NoTitleSource { .. } => "REVEAL003",
            Self::Tree(err) => err.code(),
            Self::Config(err) => err.code(),
        }
    }
}

/// Errors raised while validating configuration and slide options
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An option value outside its allowed set or format
    #[error("Invalid value '{value}' for option '{option}': expected {expected}")]
    InvalidOption {
        option: String,
        value: String,
        expected: String,
    },

    /// A slide option this engine does not know
    #[error("Unknown slide option '{option}'")]
    UnknownOption { option: String },

    /// Break depths start at 1
    #[error("Invalid break depth {depth}: depths start at 1")]
    InvalidBreakDepth { depth: u32 },

    /// Theme must be a stylesheet file name
    #[error("Invalid theme '{theme}': expected a file name ending in .css")]
    InvalidTheme { theme: String },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error while reading a config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create an invalid option error
    pub fn invalid_option(
        option: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            option: option.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidOption { .. } => "CONFIG001",
            Self::UnknownOption { .. } => "CONFIG002",
            Self::InvalidBreakDepth { .. } => "CONFIG003",
            Self::InvalidTheme { .. } => "CONFIG004",
            Self::Toml(_) => "CONFIG005",
            Self::Io(_) => "CONFIG006",
        }
    }
}
