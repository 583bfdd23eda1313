//! Section depth annotation

use revealdok_ast::{Doctree, NodeId};

/// Distance of a node from the document root (at least 1)
pub fn section_depth(tree: &Doctree, id: NodeId) -> u32 {
    let depth = tree.ancestors(id).count() as u32;
    depth.max(1)
}

/// Record the depth of every attached section, its title and every slide break
///
/// A section's title gets the section's depth. A slide break gets the depth
/// of its nearest enclosing section, or 1 when it has none. Returns the
/// number of sections annotated; running it twice yields the same values.
pub fn annotate_depths(tree: &mut Doctree) -> usize {
    let mut sections = 0;

    for id in tree.descendants(tree.root()) {
        if tree.kind(id).is_section() {
            let depth = section_depth(tree, id);
            tree.node_mut(id).kind.set_depth(depth);
            if let Some(&first) = tree.children(id).first() {
                if tree.kind(first).is_title() {
                    tree.node_mut(first).kind.set_depth(depth);
                }
            }
            sections += 1;
        } else if tree.kind(id).is_slide_break() {
            let depth = tree
                .ancestors(id)
                .find(|&a| tree.kind(a).is_section())
                .map(|section| section_depth(tree, section))
                .unwrap_or(1);
            tree.node_mut(id).kind.set_depth(depth);
        }
    }

    log::debug!("Annotated depth of {} sections", sections);
    sections
}
