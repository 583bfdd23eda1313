//! Build pipeline
//!
//! Runs the transform stages in order on one tree, then renders it with the
//! translator for the configured target.

use revealdok_ast::Doctree;

use crate::config::{OutputTarget, RevealConfig};
use crate::error::Result;
use crate::transforms::{annotate_depths, promote_title_slides, resolve_breaks, restructure};
use crate::writer::{render, HtmlTranslator, RevealTranslator};

/// What the transform stages did to a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Slide breaks materialized (or dropped, for document targets)
    pub breaks: usize,
    /// Sections moved to the document root
    pub hoisted: usize,
    /// Over-deep sections replaced by their children
    pub unwrapped: usize,
    /// Sections whose title got its own slide
    pub split: usize,
}

/// Configured transform and render pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: RevealConfig,
    target: OutputTarget,
}

impl Pipeline {
    /// Validate the configuration and build a pipeline for it
    pub fn new(config: RevealConfig) -> Result<Self> {
        config.validate()?;
        let target = config.output_target();
        Ok(Self { config, target })
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Rewrite the tree in place
    ///
    /// The first failing stage aborts the build; the tree may then be
    /// partially rewritten and should be discarded.
    pub fn transform(&self, tree: &mut Doctree) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        annotate_depths(tree);
        report.breaks = resolve_breaks(tree, &self.config, &self.target)?;

        if self.target.is_slides() {
            if !self.config.break_depths.is_empty() {
                let restructured = restructure(tree, &self.config)?;
                report.hoisted = restructured.hoisted;
                report.unwrapped = restructured.unwrapped;
                tree.compact();
            }
            annotate_depths(tree);
            report.split = promote_title_slides(tree, &self.config)?;
        }

        annotate_depths(tree);
        log::debug!("Transformed tree for '{}': {:?}", self.target.name(), report);
        Ok(report)
    }

    /// Render a transformed tree
    pub fn render(&self, tree: &Doctree) -> String {
        match self.target {
            OutputTarget::Slides => render(RevealTranslator::new(), tree),
            OutputTarget::Document(_) => render(HtmlTranslator::new(), tree),
        }
    }

    /// Transform then render
    pub fn build(&self, tree: &mut Doctree) -> Result<String> {
        self.transform(tree)?;
        Ok(self.render(tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, RevealError};
    use revealdok_ast::NodeKind;

    fn sample() -> Doctree {
        let mut tree = Doctree::new();
        let root = tree.root();
        let deck = tree.add_section(root, "Deck").unwrap();
        let part = tree.add_section(deck, "Part").unwrap();
        tree.add_paragraph(part, "first").unwrap();
        tree.add_node(part, NodeKind::Transition).unwrap();
        tree.add_paragraph(part, "second").unwrap();
        tree
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RevealConfig {
            theme: "black".to_string(),
            ..Default::default()
        };
        let err = Pipeline::new(config).unwrap_err();
        assert!(matches!(
            err,
            RevealError::Config(ConfigError::InvalidTheme { .. })
        ));
    }

    #[test]
    fn test_slides_report() {
        let pipeline = Pipeline::new(RevealConfig::default()).unwrap();
        let mut tree = sample();

        let report = pipeline.transform(&mut tree).unwrap();

        // deck, part, and the section made from the transition
        assert_eq!(
            report,
            BuildReport {
                breaks: 1,
                hoisted: 0,
                unwrapped: 0,
                split: 3,
            }
        );
        assert!(tree.find_first(|n| n.kind.is_slide_break()).is_none());
    }

    #[test]
    fn test_document_target_keeps_plain_structure() {
        let config = RevealConfig {
            target: "html".to_string(),
            ..Default::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let mut tree = sample();

        let html = pipeline.build(&mut tree).unwrap();

        assert_eq!(
            html,
            "<section>\n<h1>Deck</h1>\n\
             <section>\n<h2>Part</h2>\n<p>first</p>\n<p>second</p>\n</section>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_slides_build_balanced() {
        let pipeline = Pipeline::new(RevealConfig::default()).unwrap();
        let mut tree = sample();

        let html = pipeline.build(&mut tree).unwrap();

        assert_eq!(
            html.matches("<section").count(),
            html.matches("</section>").count()
        );
    }

    #[test]
    fn test_vertical_titles_get_own_slide() {
        let pipeline = Pipeline::new(RevealConfig::default()).unwrap();
        let mut tree = sample();

        let html = pipeline.build(&mut tree).unwrap();

        assert_eq!(
            html,
            "<section class=\"section\">\n<section>\n<h1>Deck</h1>\n</section>\n</section>\n\
             <section class=\"section\">\n\
             <section class=\"section\">\n<h2>Part</h2>\n</section>\n\
             <p>first</p>\n\
             </section>\n\
             <section class=\"section\">\n\
             <section id=\"id1\" class=\"section\">\n<h2>Part</h2>\n</section>\n\
             <p>second</p>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_root_section_kept_when_not_unwrapped() {
        let config = RevealConfig {
            unwrap_root_section: false,
            ..Default::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let mut tree = sample();

        let html = pipeline.build(&mut tree).unwrap();

        // the root section is the only horizontal slide
        assert!(html.starts_with(
            "<section class=\"section\">\n<section class=\"section\">\n<h2>Deck</h2>"
        ));
        assert!(html.contains("<h3>Part</h3>\n<p>first</p>"));
    }
}
