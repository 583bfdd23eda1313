//! revealdok-ast - Document tree definitions
//!
//! This crate provides the arena-backed document tree that the revealdok
//! transforms rewrite into a slide deck. Nodes are owned by the [`Doctree`]
//! and addressed through [`NodeId`] handles; the parent link is a plain
//! index used for upward navigation only.
//!
//! # Example
//!
//! ```
//! use revealdok_ast::{Doctree, NodeKind};
//!
//! let mut tree = Doctree::new();
//! let root = tree.root();
//! let intro = tree.add_section(root, "Intro").unwrap();
//! tree.add_paragraph(intro, "Hello").unwrap();
//!
//! assert_eq!(tree.text_content(root), "IntroHello");
//! assert!(matches!(tree.node(intro).kind, NodeKind::Section { .. }));
//! ```

pub mod error;
pub mod node;
pub mod source;
pub mod tree;

pub use error::{Result, TreeError};
pub use node::{AdmonitionKind, Attributes, Node, NodeId, NodeKind};
pub use source::SourceNode;
pub use tree::Doctree;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
