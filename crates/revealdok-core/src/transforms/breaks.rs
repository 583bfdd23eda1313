//! Slide break resolution
//!
//! Transition markers become slide breaks, and every slide break becomes a
//! new section holding the content that followed it. The new section is
//! inserted right after the section the break sat in.

use revealdok_ast::{Doctree, NodeId, NodeKind, TreeError};

use crate::config::{OutputTarget, RevealConfig};
use crate::error::{Result, RevealError};

/// Replace every transition marker by an untitled slide break
///
/// Does nothing unless `break_on_transition` is set. Returns the number of
/// markers replaced.
pub fn migrate_transitions(tree: &mut Doctree, config: &RevealConfig) -> Result<usize> {
    if !config.break_on_transition {
        return Ok(0);
    }

    let transitions = tree.find_all(|n| matches!(n.kind, NodeKind::Transition));
    for &transition in &transitions {
        let attrs = tree.node(transition).attrs.clone();
        let marker = tree.create(NodeKind::slide_break(""), attrs);
        tree.replace(transition, marker)?;
    }

    log::debug!("Migrated {} transitions to slide breaks", transitions.len());
    Ok(transitions.len())
}

/// Combine an inherited title with a raw local title
///
/// `+suffix` appends to the inherited title, any other non-empty value
/// replaces it, and an empty value keeps it.
pub fn effective_title(inherited: &str, local_title: &str) -> String {
    let local = local_title.trim();
    if let Some(rest) = local.strip_prefix('+') {
        format!("{} {}", inherited, rest.trim()).trim().to_string()
    } else if !local.is_empty() {
        local.to_string()
    } else {
        inherited.to_string()
    }
}

/// Resolve every slide break in document order
///
/// For slide targets each break is materialized into a section, one break
/// per pass, until none remain. The arena is compacted along the way, so
/// node ids held from before the call are invalid afterwards. For other
/// targets breaks are deleted and the content after them stays where it is.
/// Returns the number of breaks resolved.
pub fn resolve_breaks(
    tree: &mut Doctree,
    config: &RevealConfig,
    target: &OutputTarget,
) -> Result<usize> {
    migrate_transitions(tree, config)?;

    if !target.is_slides() {
        let markers = tree.find_all(|n| n.kind.is_slide_break());
        for &marker in &markers {
            tree.detach(marker)?;
        }
        log::debug!(
            "Dropped {} slide breaks for '{}' output",
            markers.len(),
            target.name()
        );
        return Ok(markers.len());
    }

    let mut passes = 0;
    let mut live = tree.arena_len();
    while let Some((marker, local_title, depth)) = next_slide_break(tree) {
        materialize(tree, marker, &local_title, depth, config)?;
        passes += 1;
        // each pass leaves the copied-from tail behind in the arena
        if tree.arena_len() > 2 * live {
            live = tree.compact();
        }
    }
    tree.compact();

    log::debug!("Materialized {} slide breaks", passes);
    Ok(passes)
}

fn next_slide_break(tree: &Doctree) -> Option<(NodeId, String, Option<u32>)> {
    tree.descendants(tree.root())
        .into_iter()
        .find_map(|id| match &tree.node(id).kind {
            NodeKind::SlideBreak { local_title, depth } => Some((id, local_title.clone(), *depth)),
            _ => None,
        })
}

fn materialize(
    tree: &mut Doctree,
    marker: NodeId,
    local_title: &str,
    depth: Option<u32>,
    config: &RevealConfig,
) -> Result<NodeId> {
    let parent = tree
        .parent(marker)
        .filter(|&p| tree.kind(p).is_section())
        .ok_or(RevealError::OrphanSlideBreak { node: marker })?;

    let inherited = if config.newslides_inherit_titles {
        let source = title_source(tree, parent)?;
        section_title(tree, source)?
    } else {
        section_title(tree, parent)?
    };
    let title = effective_title(&inherited, local_title);

    let attrs = tree.node(marker).attrs.clone();
    let section = tree.create(
        NodeKind::Section {
            depth,
            local_title: Some(local_title.to_string()),
        },
        attrs,
    );
    if tree.node(section).attrs.ids.is_empty() {
        tree.assign_auto_id(section);
    }
    let title_node = tree.add_node(section, NodeKind::Title { depth })?;
    tree.add_node(title_node, NodeKind::text(title.as_str()))?;

    let start = tree
        .index_of(parent, marker)
        .ok_or(TreeError::NotAChild {
            parent,
            child: marker,
        })?
        + 1;
    let following = tree.children(parent)[start..].to_vec();
    for node in following {
        tree.copy_into(node, section)?;
        tree.detach(node)?;
    }

    let chapter = tree.parent(parent).ok_or(TreeError::NoParent(parent))?;
    let index = tree.index_of(chapter, parent).ok_or(TreeError::NotAChild {
        parent: chapter,
        child: parent,
    })?;
    tree.insert_child(chapter, index + 1, section)?;
    tree.detach(marker)?;

    log::debug!("Slide break {:?} became section '{}'", marker, title);
    Ok(section)
}

/// Nearest section at or before `section` that was not built from a break
fn title_source(tree: &Doctree, section: NodeId) -> Result<NodeId> {
    let mut check = section;
    loop {
        match tree.kind(check) {
            NodeKind::Section {
                local_title: None, ..
            } => return Ok(check),
            _ => {
                check = tree
                    .previous_sibling(check)
                    .ok_or(RevealError::NoTitleSource { node: section })?;
            }
        }
    }
}

fn section_title(tree: &Doctree, section: NodeId) -> Result<String> {
    tree.children(section)
        .first()
        .filter(|&&first| tree.kind(first).is_title())
        .map(|&title| tree.text_content(title).trim().to_string())
        .ok_or(RevealError::missing_title(section))
}
