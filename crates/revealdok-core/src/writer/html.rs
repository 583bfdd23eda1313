//! Generic HTML5 translator
//!
//! Renders every node kind as plain HTML. Slide-only nodes are dropped, so
//! this is what non-slide targets get. The reveal.js translator falls back
//! to it for every kind it does not handle itself.

use quick_xml::escape::escape;
use revealdok_ast::{Doctree, NodeId, NodeKind};

use super::{common_attrs, start_tag, Translator, Visit};

/// Plain HTML writer
#[derive(Debug, Default)]
pub struct HtmlTranslator {
    body: Vec<String>,
    section_level: u32,
}

impl HtmlTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw markup fragment
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.body.push(fragment.into());
    }

    /// Emitted fragments, in order
    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn into_body(self) -> Vec<String> {
        self.body
    }

    /// Open a title as a heading of the given level
    ///
    /// Titles of sections and of the document become `<hN>`; titles of other
    /// blocks become a `<p>` classed after the block.
    pub fn open_title(&mut self, tree: &Doctree, id: NodeId, level: u32) {
        let attrs = &tree.node(id).attrs;
        match title_owner(tree, id) {
            Some(owner) => {
                let class = format!("{}-title", owner);
                self.push(start_tag("p", &common_attrs(attrs, &[class.as_str()])));
            }
            None => {
                let tag = format!("h{}", heading_level(level));
                self.push(start_tag(&tag, &common_attrs(attrs, &[])));
            }
        }
    }

    /// Close what [`HtmlTranslator::open_title`] opened
    pub fn close_title(&mut self, tree: &Doctree, id: NodeId, level: u32) {
        match title_owner(tree, id) {
            Some(_) => self.push("</p>\n"),
            None => self.push(format!("</h{}>\n", heading_level(level))),
        }
    }

    fn open(&mut self, tree: &Doctree, id: NodeId, tag: &str, extra_classes: &[&str]) {
        let attrs = common_attrs(&tree.node(id).attrs, extra_classes);
        self.push(start_tag(tag, &attrs));
    }
}

/// Kind name of the block owning a non-heading title
fn title_owner(tree: &Doctree, id: NodeId) -> Option<&'static str> {
    let parent = tree.parent(id)?;
    match tree.kind(parent) {
        NodeKind::Document | NodeKind::Section { .. } => None,
        other => Some(other.name()),
    }
}

fn heading_level(level: u32) -> u32 {
    level.clamp(1, 6)
}

impl Translator for HtmlTranslator {
    fn visit(&mut self, tree: &Doctree, id: NodeId) -> Visit {
        match tree.kind(id) {
            NodeKind::Document => {}
            NodeKind::Section { .. } => {
                self.section_level += 1;
                self.open(tree, id, "section", &[]);
                self.push("\n");
            }
            NodeKind::Title { .. } => self.open_title(tree, id, self.section_level),
            NodeKind::Text { text } => self.push(escape(text.as_str()).into_owned()),
            NodeKind::Paragraph => self.open(tree, id, "p", &[]),
            NodeKind::Emphasis => self.open(tree, id, "em", &[]),
            NodeKind::Strong => self.open(tree, id, "strong", &[]),
            NodeKind::Literal => self.open(tree, id, "code", &[]),
            NodeKind::LiteralBlock { language } => {
                let language = language.as_ref().map(|l| format!("language-{}", l));
                let extra: Vec<&str> = language.iter().map(String::as_str).collect();
                self.open(tree, id, "pre", &extra);
            }
            NodeKind::BulletList => {
                self.open(tree, id, "ul", &[]);
                self.push("\n");
            }
            NodeKind::EnumeratedList => {
                self.open(tree, id, "ol", &[]);
                self.push("\n");
            }
            NodeKind::ListItem => self.open(tree, id, "li", &[]),
            NodeKind::Image { uri, alt } => {
                let mut attrs = vec![("src", uri.clone())];
                attrs.push(("alt", alt.clone().unwrap_or_default()));
                attrs.extend(common_attrs(&tree.node(id).attrs, &[]));
                self.push(start_tag("img", &attrs));
                self.push("\n");
            }
            NodeKind::Transition => {
                self.open(tree, id, "hr", &[]);
                self.push("\n");
            }
            NodeKind::Admonition { kind } => {
                self.open(tree, id, "div", &["admonition", kind.as_str()]);
                self.push("\n");
            }
            NodeKind::Sidebar => {
                self.open(tree, id, "aside", &["sidebar"]);
                self.push("\n");
            }
            NodeKind::Topic => {
                self.open(tree, id, "div", &["topic"]);
                self.push("\n");
            }
            NodeKind::SlideBreak { .. } | NodeKind::Interslide | NodeKind::SpeakerNote => {
                return Visit::SkipNode
            }
        }
        Visit::Continue
    }

    fn depart(&mut self, tree: &Doctree, id: NodeId) {
        match tree.kind(id) {
            NodeKind::Document
            | NodeKind::Text { .. }
            | NodeKind::Image { .. }
            | NodeKind::Transition
            | NodeKind::SlideBreak { .. }
            | NodeKind::Interslide
            | NodeKind::SpeakerNote => {}
            NodeKind::Section { .. } => {
                self.section_level = self.section_level.saturating_sub(1);
                self.push("</section>\n");
            }
            NodeKind::Title { .. } => self.close_title(tree, id, self.section_level),
            NodeKind::Paragraph => self.push("</p>\n"),
            NodeKind::Emphasis => self.push("</em>"),
            NodeKind::Strong => self.push("</strong>"),
            NodeKind::Literal => self.push("</code>"),
            NodeKind::LiteralBlock { .. } => self.push("</pre>\n"),
            NodeKind::BulletList => self.push("</ul>\n"),
            NodeKind::EnumeratedList => self.push("</ol>\n"),
            NodeKind::ListItem => self.push("</li>\n"),
            NodeKind::Admonition { .. } | NodeKind::Topic => self.push("</div>\n"),
            NodeKind::Sidebar => self.push("</aside>\n"),
        }
    }

    fn astext(&self) -> String {
        self.body.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::render;
    use revealdok_ast::{AdmonitionKind, Attributes};

    #[test]
    fn test_sections_and_headings() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let top = tree.add_section(root, "Top").unwrap();
        tree.node_mut(top).attrs.ids.push("top".to_string());
        let sub = tree.add_section(top, "Sub").unwrap();
        tree.add_paragraph(sub, "a < b").unwrap();

        let html = render(HtmlTranslator::new(), &tree);

        assert_eq!(
            html,
            "<section id=\"top\">\n<h1>Top</h1>\n\
             <section>\n<h2>Sub</h2>\n<p>a &lt; b</p>\n</section>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_inline_markup() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let para = tree.add_node(root, NodeKind::Paragraph).unwrap();
        let strong = tree.add_node(para, NodeKind::Strong).unwrap();
        tree.add_node(strong, NodeKind::text("bold")).unwrap();
        tree.add_node(para, NodeKind::text(" and ")).unwrap();
        let literal = tree.add_node(para, NodeKind::Literal).unwrap();
        tree.add_node(literal, NodeKind::text("x & y")).unwrap();

        let html = render(HtmlTranslator::new(), &tree);
        assert_eq!(
            html,
            "<p><strong>bold</strong> and <code>x &amp; y</code></p>\n"
        );
    }

    #[test]
    fn test_blocks() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let code = tree
            .add_node(
                root,
                NodeKind::LiteralBlock {
                    language: Some("rust".to_string()),
                },
            )
            .unwrap();
        tree.add_node(code, NodeKind::text("fn main() {}")).unwrap();
        let list = tree.add_node(root, NodeKind::BulletList).unwrap();
        let item = tree.add_node(list, NodeKind::ListItem).unwrap();
        tree.add_paragraph(item, "one").unwrap();
        tree.add_node(
            root,
            NodeKind::Image {
                uri: "logo.png".to_string(),
                alt: Some("Logo".to_string()),
            },
        )
        .unwrap();

        let html = render(HtmlTranslator::new(), &tree);
        assert!(html.contains("<pre class=\"language-rust\">fn main() {}</pre>"));
        assert!(html.contains("<ul>\n<li><p>one</p>\n</li>\n</ul>"));
        assert!(html.contains("<img src=\"logo.png\" alt=\"Logo\">"));
    }

    #[test]
    fn test_admonition_and_block_titles() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let warning = tree
            .add_node_with(
                root,
                NodeKind::Admonition {
                    kind: AdmonitionKind::Warning,
                },
                Attributes::with_class("custom"),
            )
            .unwrap();
        tree.add_title(warning, "Careful").unwrap();
        tree.add_paragraph(warning, "Hot").unwrap();

        let html = render(HtmlTranslator::new(), &tree);
        assert_eq!(
            html,
            "<div class=\"custom admonition warning\">\n\
             <p class=\"admonition-title\">Careful</p>\n\
             <p>Hot</p>\n</div>\n"
        );
    }

    #[test]
    fn test_slide_only_nodes_dropped() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let section = tree.add_section(root, "Deck").unwrap();
        let note = tree.add_node(section, NodeKind::SpeakerNote).unwrap();
        tree.add_paragraph(note, "psst").unwrap();
        let inter = tree.add_node(section, NodeKind::Interslide).unwrap();
        tree.add_paragraph(inter, "aside").unwrap();
        tree.add_node(section, NodeKind::slide_break("Next")).unwrap();

        let html = render(HtmlTranslator::new(), &tree);
        assert!(!html.contains("psst"));
        assert!(!html.contains("aside"));
        assert_eq!(html, "<section>\n<h1>Deck</h1>\n</section>\n");
    }

    #[test]
    fn test_deep_heading_clamped() {
        let mut tree = Doctree::new();
        let mut parent = tree.root();
        for level in 1..=7 {
            parent = tree.add_section(parent, &format!("L{level}")).unwrap();
        }

        let html = render(HtmlTranslator::new(), &tree);
        assert!(html.contains("<h6>L6</h6>"));
        assert!(html.contains("<h6>L7</h6>"));
        assert!(!html.contains("<h7>"));
    }
}
