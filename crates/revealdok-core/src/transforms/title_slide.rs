//! Title slide splitting
//!
//! A section's heading is moved into a nested section of its own so that
//! reveal.js shows it as a separate slide instead of pinning it above the
//! section body.

use revealdok_ast::{Attributes, Doctree, NodeId, NodeKind};

use crate::config::{RevealConfig, VERTICAL_DEPTH};
use crate::error::{RevealError, Result};

/// Move a section's title into a new first child section
///
/// The new section takes over the original's identifiers; the original keeps
/// its classes and `data-*` attributes. Returns the new title section.
pub fn split_title_slide(tree: &mut Doctree, section: NodeId) -> Result<NodeId> {
    let title = match tree.children(section).first() {
        Some(&first) if tree.kind(first).is_title() => first,
        _ => return Err(RevealError::missing_title(section)),
    };

    let depth = tree.kind(section).depth().map(|d| d + 1);
    let ids = std::mem::take(&mut tree.node_mut(section).attrs.ids);

    tree.detach(title)?;
    let title_section = tree.create(
        NodeKind::Section {
            depth,
            local_title: None,
        },
        Attributes {
            ids,
            ..Default::default()
        },
    );
    if let Some(depth) = depth {
        tree.node_mut(title).kind.set_depth(depth);
    }
    tree.append_child(title_section, title)?;
    tree.insert_child(section, 0, title_section)?;

    Ok(title_section)
}

/// Split the root section and, with vertical slides on, every depth-2 section
///
/// Candidates are chosen from the recorded depths before any split happens,
/// so the title sections created here are never split again. Returns the
/// number of sections split.
pub fn promote_title_slides(tree: &mut Doctree, config: &RevealConfig) -> Result<usize> {
    let root = tree.root();
    let Some(root_section) = tree
        .children(root)
        .iter()
        .copied()
        .find(|&c| tree.kind(c).is_section())
    else {
        log::debug!("Document has no root section; no title slides split");
        return Ok(0);
    };

    let mut candidates = vec![root_section];
    if config.vertical_slides {
        candidates.extend(tree.find_all(|n| {
            n.kind.is_section() && n.kind.depth() == Some(VERTICAL_DEPTH)
        }));
    }

    for &section in &candidates {
        split_title_slide(tree, section)?;
    }

    if config.unwrap_root_section {
        tree.splice_children(root_section)?;
    }

    log::debug!("Split {} title slides", candidates.len());
    Ok(candidates.len())
}
