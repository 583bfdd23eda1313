//! revealdok CLI - Command-line interface library
//!
//! - Build: render a document tree into a reveal.js deck
//! - Transform: print the rewritten tree as JSON
//!
//! # Binary Usage
//!
//! ```bash
//! # Build a deck into out/index.html, copying reveal.js from vendor/
//! revealdok build talk.json --config revealdok.toml --output out --assets vendor/reveal.js
//!
//! # Inspect the slide structure
//! revealdok transform talk.json
//! ```

pub mod app;

pub use app::{build_command, copy_static_files, page, run_cli, transform_command};
