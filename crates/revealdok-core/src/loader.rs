//! Loading trees handed over by the host pipeline
//!
//! Slide directive options are validated here, before any transform runs,
//! so an unsupported transition name fails the build up front.

use revealdok_ast::{Attributes, Doctree, NodeKind, SourceNode};

use crate::error::{ConfigError, Result, RevealError};
use crate::options::SlideOptions;

/// Class reveal.js uses to pick up speaker notes
pub const NOTES_CLASS: &str = "notes";

/// Build a [`Doctree`] from its nested form, applying slide options
pub fn load_tree(source: &SourceNode) -> Result<Doctree> {
    Doctree::from_source_with(source, apply_options)
}

fn apply_options(source: &SourceNode, attrs: &mut Attributes) -> Result<()> {
    if matches!(source.kind, NodeKind::SpeakerNote) && attrs.classes.is_empty() {
        attrs.add_class(NOTES_CLASS);
    }

    if source.options.is_empty() {
        return Ok(());
    }

    match source.kind {
        NodeKind::Section { .. } | NodeKind::SlideBreak { .. } | NodeKind::Interslide => {
            SlideOptions::from_raw(&source.options)?.apply(attrs);
            Ok(())
        }
        _ => Err(RevealError::Config(ConfigError::invalid_option(
            "options",
            source.kind.name(),
            "slide options on a section, slide_break or interslide",
        ))),
    }
}
