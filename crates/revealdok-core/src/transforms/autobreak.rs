//! Section restructuring ("autobreak")
//!
//! Sections at the configured depths are lifted out of the hierarchy and
//! become top-level slides. Anything still nested deeper than reveal.js can
//! display is then unwrapped into its parent.

use std::collections::BTreeSet;

use revealdok_ast::{Doctree, NodeId};

use super::depth::annotate_depths;
use crate::config::RevealConfig;
use crate::error::Result;

/// Sections deeper than this are unwrapped after hoisting
pub const UNWRAP_DEPTH: u32 = 3;

/// What a restructuring pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Restructured {
    /// Sections moved to the document root
    pub hoisted: usize,
    /// Sections replaced by their children
    pub unwrapped: usize,
}

/// Hoist sections at `config.break_depths` and unwrap over-deep nesting
///
/// Depths are re-annotated before hoisting and after each step, so the tree
/// leaves this stage with fresh depth values.
pub fn restructure(tree: &mut Doctree, config: &RevealConfig) -> Result<Restructured> {
    annotate_depths(tree);
    let hoisted = hoist_sections(tree, &config.break_depths)?;

    annotate_depths(tree);
    let unwrapped = unwrap_deep_sections(tree, UNWRAP_DEPTH)?;
    annotate_depths(tree);

    log::debug!(
        "Restructured sections: {} hoisted, {} unwrapped",
        hoisted,
        unwrapped
    );
    Ok(Restructured {
        hoisted,
        unwrapped,
    })
}

/// Move every section whose recorded depth is in `depths` to the root
///
/// Sections are detached in reverse document order so that removing a later
/// section never disturbs an earlier one, then appended to the root in their
/// original order. Uses the depths already recorded on the nodes.
pub fn hoist_sections(tree: &mut Doctree, depths: &BTreeSet<u32>) -> Result<usize> {
    if depths.is_empty() {
        return Ok(0);
    }

    let targets = sections_where(tree, |depth| depths.contains(&depth));

    let mut lifted = Vec::with_capacity(targets.len());
    for &section in targets.iter().rev() {
        let copy = tree.deep_copy(section)?;
        tree.detach(section)?;
        lifted.push(copy);
    }

    let root = tree.root();
    for copy in lifted.into_iter().rev() {
        tree.append_child(root, copy)?;
    }

    Ok(targets.len())
}

/// Replace every section deeper than `max_depth` by its own children
pub fn unwrap_deep_sections(tree: &mut Doctree, max_depth: u32) -> Result<usize> {
    let deep = sections_where(tree, |depth| depth > max_depth);
    for &section in deep.iter().rev() {
        tree.splice_children(section)?;
    }
    Ok(deep.len())
}

fn sections_where(tree: &Doctree, pred: impl Fn(u32) -> bool) -> Vec<NodeId> {
    tree.find_all(|n| n.kind.is_section() && n.kind.depth().is_some_and(&pred))
}

#[cfg(test)]
mod tests {
    use super::*;
    use revealdok_ast::NodeKind;

    fn section_texts(tree: &Doctree, parent: NodeId) -> Vec<String> {
        tree.children(parent)
            .iter()
            .filter(|&&c| tree.kind(c).is_section())
            .map(|&c| tree.text_content(c))
            .collect()
    }

    fn find_section(tree: &Doctree, title: &str) -> Option<NodeId> {
        tree.find_all(|n| n.kind.is_section())
            .into_iter()
            .find(|&s| tree.text_content(tree.children(s)[0]) == title)
    }

    fn max_section_depth(tree: &Doctree) -> u32 {
        tree.find_all(|n| n.kind.is_section())
            .into_iter()
            .filter_map(|id| tree.kind(id).depth())
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_reverse_detachment_preserves_order() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let a = tree.add_section(root, "a").unwrap();
        let middle = tree.add_section(root, "middle").unwrap();
        let b = tree.add_section(root, "b").unwrap();
        tree.node_mut(a).kind.set_depth(2);
        tree.node_mut(middle).kind.set_depth(1);
        tree.node_mut(b).kind.set_depth(2);

        let hoisted = hoist_sections(&mut tree, &BTreeSet::from([2])).unwrap();

        assert_eq!(hoisted, 2);
        assert_eq!(section_texts(&tree, root), vec!["middle", "a", "b"]);
        assert_eq!(tree.children(root)[0], middle);
        assert!(!tree.is_attached(a));
        assert!(!tree.is_attached(b));
    }

    #[test]
    fn test_hoist_depth_two() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let top = tree.add_section(root, "Top").unwrap();
        tree.add_paragraph(top, "intro").unwrap();
        let first = tree.add_section(top, "First").unwrap();
        tree.add_section(first, "Sub").unwrap();
        tree.add_section(top, "Second").unwrap();

        let result = restructure(
            &mut tree,
            &RevealConfig {
                break_depths: BTreeSet::from([2]),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(
            result,
            Restructured {
                hoisted: 2,
                unwrapped: 0
            }
        );
        assert_eq!(
            section_texts(&tree, root),
            vec!["Topintro", "FirstSub", "Second"]
        );
        let depths: Vec<_> = tree
            .children(root)
            .iter()
            .map(|&s| tree.kind(s).depth())
            .collect();
        assert_eq!(depths, vec![Some(1), Some(1), Some(1)]);
    }

    #[test]
    fn test_nested_targets_both_hoisted() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let top = tree.add_section(root, "Top").unwrap();
        let two = tree.add_section(top, "Two").unwrap();
        tree.add_section(two, "Three").unwrap();

        annotate_depths(&mut tree);
        hoist_sections(&mut tree, &BTreeSet::from([2, 3])).unwrap();
        assert_eq!(section_texts(&tree, root), vec!["Top", "Two", "Three"]);
    }

    #[test]
    fn test_unwrap_over_deep_sections() {
        let mut tree = Doctree::new();
        let mut parent = tree.root();
        for title in ["Top", "Two", "Three", "Four", "Five"] {
            parent = tree.add_section(parent, title).unwrap();
        }
        tree.add_paragraph(parent, "deep").unwrap();
        let before = tree.text_content(tree.root());

        let result = restructure(
            &mut tree,
            &RevealConfig {
                break_depths: BTreeSet::from([2]),
                ..Default::default()
            },
        )
        .unwrap();

        // Two is now top-level, so Five sits at depth 4
        assert_eq!(result.unwrapped, 1);
        assert!(find_section(&tree, "Five").is_none());
        let four = find_section(&tree, "Four").unwrap();
        assert_eq!(tree.kind(four).depth(), Some(3));
        assert_eq!(tree.text_content(four), "FourFivedeep");
        assert!(max_section_depth(&tree) <= UNWRAP_DEPTH);
        assert_eq!(tree.text_content(tree.root()), before);
    }

    #[test]
    fn test_nesting_ceiling_without_hoisting() {
        let mut tree = Doctree::new();
        let mut parent = tree.root();
        for level in 1..=7 {
            parent = tree.add_section(parent, &format!("L{level}")).unwrap();
        }

        let result = restructure(&mut tree, &RevealConfig::default()).unwrap();
        assert_eq!(result.hoisted, 0);
        assert_eq!(result.unwrapped, 4);
        assert!(max_section_depth(&tree) <= UNWRAP_DEPTH);
        assert_eq!(tree.text_content(tree.root()), "L1L2L3L4L5L6L7");
    }

    #[test]
    fn test_empty_depths_is_noop() {
        let mut tree = Doctree::new();
        let root = tree.root();
        let top = tree.add_section(root, "Top").unwrap();
        tree.add_section(top, "Two").unwrap();
        annotate_depths(&mut tree);

        assert_eq!(hoist_sections(&mut tree, &BTreeSet::new()).unwrap(), 0);
        assert_eq!(section_texts(&tree, root), vec!["TopTwo"]);
        assert!(matches!(tree.kind(top), NodeKind::Section { .. }));
    }
}
