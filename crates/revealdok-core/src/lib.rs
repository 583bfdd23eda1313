//! revealdok-core - Document trees to reveal.js slide decks
//!
//! Rewrites a parsed document tree into a two-level slide stack and renders
//! it as reveal.js markup.
//!
//! # Example
//!
//! ```
//! use revealdok_ast::{Doctree, NodeKind};
//! use revealdok_core::{Pipeline, RevealConfig};
//!
//! let mut tree = Doctree::new();
//! let root = tree.root();
//! let deck = tree.add_section(root, "Deck").unwrap();
//! tree.add_paragraph(deck, "first").unwrap();
//! tree.add_node(deck, NodeKind::Transition).unwrap();
//! tree.add_paragraph(deck, "second").unwrap();
//!
//! let pipeline = Pipeline::new(RevealConfig::default()).unwrap();
//! let html = pipeline.build(&mut tree).unwrap();
//! assert!(html.contains("<h1>Deck</h1>"));
//! assert!(html.contains("<p>second</p>"));
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod options;
pub mod pipeline;
pub mod transforms;
pub mod writer;

pub use config::{OutputTarget, RevealConfig, SLIDES_TARGET};
pub use error::{ConfigError, Result, RevealError};
pub use loader::load_tree;
pub use options::SlideOptions;
pub use pipeline::{BuildReport, Pipeline};
pub use writer::{HtmlTranslator, RevealTranslator, Translator, Visit};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
