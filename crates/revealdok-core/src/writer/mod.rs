//! Markup writers
//!
//! A [`Translator`] gets an enter and an exit call for every node that
//! [`walk`] reaches. Returning [`Visit::SkipNode`] from `visit` drops the
//! whole subtree: its children are not walked and `depart` is not called.

mod html;
mod revealjs;

pub use html::HtmlTranslator;
pub use revealjs::RevealTranslator;

use quick_xml::escape::escape;
use revealdok_ast::{Attributes, Doctree, NodeId};

/// What the walker does after entering a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Walk the children, then depart
    Continue,
    /// Skip the children and the departure
    SkipNode,
}

/// Enter/exit hooks for a markup writer
pub trait Translator {
    fn visit(&mut self, tree: &Doctree, id: NodeId) -> Visit;

    fn depart(&mut self, tree: &Doctree, id: NodeId);

    /// Markup emitted so far
    fn astext(&self) -> String;
}

/// Depth-first walk of the subtree under `id`
pub fn walk<T: Translator + ?Sized>(translator: &mut T, tree: &Doctree, id: NodeId) {
    if translator.visit(tree, id) == Visit::SkipNode {
        return;
    }
    for &child in tree.children(id) {
        walk(translator, tree, child);
    }
    translator.depart(tree, id);
}

/// Walk the whole tree and return the markup
pub fn render<T: Translator>(mut translator: T, tree: &Doctree) -> String {
    walk(&mut translator, tree, tree.root());
    translator.astext()
}

/// Build an opening tag; attribute values are escaped
pub fn start_tag(tag: &str, attrs: &[(&str, String)]) -> String {
    let mut out = format!("<{}", tag);
    for (name, value) in attrs {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value.as_str())));
    }
    out.push('>');
    out
}

/// `id` and `class` attributes of a node, with extra classes appended
///
/// Only the first identifier is emitted. Empty attributes are left out.
pub fn common_attrs(attrs: &Attributes, extra_classes: &[&str]) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();
    if let Some(id) = attrs.ids.first() {
        out.push(("id", id.clone()));
    }

    let classes: Vec<&str> = attrs
        .classes
        .iter()
        .map(String::as_str)
        .chain(extra_classes.iter().copied())
        .collect();
    if !classes.is_empty() {
        out.push(("class", classes.join(" ")));
    }
    out
}
