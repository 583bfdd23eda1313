//! reveal.js translator
//!
//! Sections become nested `<section>` slides. reveal.js only understands two
//! levels (horizontal and vertical), so only sections entered at level 2 or
//! 3 open a container; deeper ones render inline into their slide.

use revealdok_ast::{Doctree, NodeId, NodeKind};

use super::{common_attrs, start_tag, HtmlTranslator, Translator, Visit};

/// Slide deck writer
///
/// `section_level` starts at 1 and counts the sections entered so far, so
/// a top-level section is rendered at level 2.
#[derive(Debug)]
pub struct RevealTranslator {
    base: HtmlTranslator,
    section_level: u32,
}

impl Default for RevealTranslator {
    fn default() -> Self {
        Self {
            base: HtmlTranslator::new(),
            section_level: 1,
        }
    }
}

impl RevealTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting level
    pub fn section_level(&self) -> u32 {
        self.section_level
    }

    /// Open a slide container carrying the node's classes and `data-*` attributes
    fn new_section(&mut self, tree: &Doctree, id: NodeId, class: &str) {
        let node = tree.node(id);
        let mut attrs: Vec<(&str, String)> = common_attrs(&node.attrs, &[class]);
        attrs.extend(
            node.attrs
                .data_attributes()
                .map(|(key, value)| (key, value.to_string())),
        );
        self.base.push(start_tag("section", &attrs));
        self.base.push("\n");
    }

    /// Titles of horizontal and vertical slides get a container of their own
    fn wraps_title(&self) -> bool {
        matches!(self.section_level, 1 | 2)
    }

    fn heading_level(&self) -> u32 {
        self.section_level.saturating_sub(1)
    }
}

impl Translator for RevealTranslator {
    fn visit(&mut self, tree: &Doctree, id: NodeId) -> Visit {
        match tree.kind(id) {
            NodeKind::Section { .. } => {
                self.section_level += 1;
                if matches!(self.section_level, 2 | 3) {
                    self.new_section(tree, id, "section");
                }
            }
            NodeKind::Title { .. } => {
                if self.wraps_title() {
                    self.base.push("<section>\n");
                }
                let level = self.heading_level();
                self.base.open_title(tree, id, level);
            }
            NodeKind::Interslide => {
                // an interslide interrupts the slide it appears in
                if self.section_level > 2 {
                    self.base.push("</section>\n");
                }
                self.new_section(tree, id, "interslide");
            }
            NodeKind::SpeakerNote => {
                let attrs = common_attrs(&tree.node(id).attrs, &[]);
                self.base.push(start_tag("aside", &attrs));
            }
            NodeKind::Admonition { .. } | NodeKind::Sidebar | NodeKind::Topic => {
                return Visit::SkipNode
            }
            // resolved before rendering; a leftover marker renders nothing
            NodeKind::SlideBreak { .. } => return Visit::SkipNode,
            NodeKind::Document
            | NodeKind::Text { .. }
            | NodeKind::Paragraph
            | NodeKind::Emphasis
            | NodeKind::Strong
            | NodeKind::Literal
            | NodeKind::LiteralBlock { .. }
            | NodeKind::BulletList
            | NodeKind::EnumeratedList
            | NodeKind::ListItem
            | NodeKind::Image { .. }
            | NodeKind::Transition => return self.base.visit(tree, id),
        }
        Visit::Continue
    }

    fn depart(&mut self, tree: &Doctree, id: NodeId) {
        match tree.kind(id) {
            NodeKind::Section { .. } => {
                self.section_level = self.section_level.saturating_sub(1);
                if matches!(self.section_level, 1 | 2) {
                    self.base.push("</section>\n");
                }
            }
            NodeKind::Title { .. } => {
                let level = self.heading_level();
                self.base.close_title(tree, id, level);
                if self.wraps_title() {
                    self.base.push("</section>\n");
                }
            }
            NodeKind::Interslide => {
                // nested interslides close with their enclosing slide
                if self.section_level <= 2 {
                    self.base.push("</section>\n");
                }
            }
            NodeKind::SpeakerNote => self.base.push("</aside>\n"),
            NodeKind::Admonition { .. }
            | NodeKind::Sidebar
            | NodeKind::Topic
            | NodeKind::SlideBreak { .. } => {}
            NodeKind::Document
            | NodeKind::Text { .. }
            | NodeKind::Paragraph
            | NodeKind::Emphasis
            | NodeKind::Strong
            | NodeKind::Literal
            | NodeKind::LiteralBlock { .. }
            | NodeKind::BulletList
            | NodeKind::EnumeratedList
            | NodeKind::ListItem
            | NodeKind::Image { .. }
            | NodeKind::Transition => self.base.depart(tree, id),
        }
    }

    fn astext(&self) -> String {
        self.base.astext()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::render;
    use revealdok_ast::{AdmonitionKind, Attributes};

    fn deck() -> (Doctree, NodeId) {
        let mut tree = Doctree::new();
        let root = tree.root();
        let top = tree.add_section(root, "Deck").unwrap();
        (tree, top)
    }

    #[test]
    fn test_horizontal_slide_title_wrapped() {
        let (mut tree, top) = deck();
        tree.add_paragraph(top, "intro").unwrap();

        let html = render(RevealTranslator::new(), &tree);
        assert_eq!(
            html,
            "<section class=\"section\">\n\
             <section>\n<h1>Deck</h1>\n</section>\n\
             <p>intro</p>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_vertical_and_inline_sections() {
        let (mut tree, top) = deck();
        let vertical = tree.add_section(top, "Vertical").unwrap();
        let inline = tree.add_section(vertical, "Inline").unwrap();
        tree.add_paragraph(inline, "body").unwrap();

        let html = render(RevealTranslator::new(), &tree);
        assert_eq!(
            html,
            "<section class=\"section\">\n\
             <section>\n<h1>Deck</h1>\n</section>\n\
             <section class=\"section\">\n<h2>Vertical</h2>\n\
             <h3>Inline</h3>\n<p>body</p>\n\
             </section>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_data_attributes_passed_through() {
        let (mut tree, top) = deck();
        let node = tree.node_mut(top);
        node.attrs.ids.push("deck".to_string());
        node.attrs.add_class("dark");
        node.attrs.set_data("data-transition", "zoom");
        node.attrs.set_data("data-background-color", "#000");

        let html = render(RevealTranslator::new(), &tree);
        assert!(html.starts_with(
            "<section id=\"deck\" class=\"dark section\" \
             data-background-color=\"#000\" data-transition=\"zoom\">\n"
        ));
    }

    #[test]
    fn test_skipped_blocks() {
        let (mut tree, top) = deck();
        let admonition = tree
            .add_node(
                top,
                NodeKind::Admonition {
                    kind: AdmonitionKind::Note,
                },
            )
            .unwrap();
        tree.add_paragraph(admonition, "hidden note").unwrap();
        let sidebar = tree.add_node(top, NodeKind::Sidebar).unwrap();
        tree.add_paragraph(sidebar, "hidden sidebar").unwrap();
        let topic = tree.add_node(top, NodeKind::Topic).unwrap();
        tree.add_paragraph(topic, "hidden topic").unwrap();

        let html = render(RevealTranslator::new(), &tree);
        assert!(!html.contains("hidden"));
        assert!(!html.contains("admonition"));
        assert!(!html.contains("<aside"));
        assert!(!html.contains("<div"));
    }

    #[test]
    fn test_speaker_note() {
        let (mut tree, top) = deck();
        let note = tree
            .add_node_with(top, NodeKind::SpeakerNote, Attributes::with_class("notes"))
            .unwrap();
        tree.add_paragraph(note, "say hi").unwrap();

        let html = render(RevealTranslator::new(), &tree);
        assert!(html.contains("<aside class=\"notes\"><p>say hi</p>\n</aside>\n"));
    }

    #[test]
    fn test_top_level_interslide_closes() {
        let (mut tree, top) = deck();
        let inter = tree
            .add_node_with(top, NodeKind::Interslide, Attributes::with_class("quote"))
            .unwrap();
        tree.add_paragraph(inter, "pause").unwrap();

        let html = render(RevealTranslator::new(), &tree);
        assert!(html.contains(
            "<section class=\"quote interslide\">\n<p>pause</p>\n</section>\n</section>\n"
        ));
        assert_eq!(
            html.matches("<section").count(),
            html.matches("</section>").count()
        );
    }

    #[test]
    fn test_nested_interslide_closes_interrupted_slide() {
        let (mut tree, top) = deck();
        let vertical = tree.add_section(top, "Vertical").unwrap();
        let inter = tree.add_node(vertical, NodeKind::Interslide).unwrap();
        tree.add_paragraph(inter, "pause").unwrap();

        let html = render(RevealTranslator::new(), &tree);
        assert!(html.contains(
            "<h2>Vertical</h2>\n</section>\n<section class=\"interslide\">\n<p>pause</p>\n</section>\n"
        ));
        assert_eq!(
            html.matches("<section").count(),
            html.matches("</section>").count()
        );
    }

    #[test]
    fn test_level_restored_after_walk() {
        let (mut tree, top) = deck();
        let vertical = tree.add_section(top, "Vertical").unwrap();
        tree.add_section(vertical, "Deep").unwrap();

        let mut translator = RevealTranslator::new();
        crate::writer::walk(&mut translator, &tree, tree.root());
        assert_eq!(translator.section_level(), 1);
    }
}
