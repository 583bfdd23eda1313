//! Node definitions for the document tree
//!
//! This module defines the closed set of node kinds the slide engine knows
//! about, together with the structural attributes every node carries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stable handle of a node inside a [`crate::Doctree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Build a handle from a raw arena index
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node variant
///
/// Slide-only kinds (`SlideBreak`, `Interslide`, `SpeakerNote`) are produced
/// by slide directives in the host pipeline. `Admonition`, `Sidebar` and
/// `Topic` are opaque blocks that slide output drops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Document root
    Document,
    /// A section: a title followed by body content
    Section {
        /// Distance from the document root (1 for top-level sections)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        depth: Option<u32>,
        /// Raw local title of the slide break this section was built from
        #[serde(default, skip_serializing_if = "Option::is_none")]
        local_title: Option<String>,
    },
    /// Heading of a section, interslide or block
    Title {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        depth: Option<u32>,
    },
    /// Plain text leaf
    Text { text: String },
    /// A paragraph
    Paragraph,
    /// Emphasised inline content
    Emphasis,
    /// Strong inline content
    Strong,
    /// Inline literal
    Literal,
    /// A literal/code block
    LiteralBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    /// Unordered list
    BulletList,
    /// Ordered list
    EnumeratedList,
    /// List item
    ListItem,
    /// An image
    Image {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    /// Horizontal transition marker
    Transition,
    /// Inline marker that starts a new slide
    SlideBreak {
        /// Raw local title; a leading `+` appends to the inherited title
        #[serde(default)]
        local_title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        depth: Option<u32>,
    },
    /// Freestanding slide outside the section hierarchy
    Interslide,
    /// Speaker notes
    SpeakerNote,
    /// Admonition block (note, warning, ...)
    Admonition {
        #[serde(default)]
        kind: AdmonitionKind,
    },
    /// Sidebar block
    Sidebar,
    /// Topic block
    Topic,
}

/// Admonition type variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmonitionKind {
    #[default]
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AdmonitionKind {
    /// CSS class name of the admonition
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }
}

impl NodeKind {
    /// Create a section kind with no depth annotation
    pub fn section() -> Self {
        Self::Section {
            depth: None,
            local_title: None,
        }
    }

    /// Create a title kind with no depth annotation
    pub fn title() -> Self {
        Self::Title { depth: None }
    }

    /// Create a text leaf
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a slide break with a raw local title
    pub fn slide_break(local_title: impl Into<String>) -> Self {
        Self::SlideBreak {
            local_title: local_title.into(),
            depth: None,
        }
    }

    /// Short lowercase name of the variant
    pub fn name(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Section { .. } => "section",
            Self::Title { .. } => "title",
            Self::Text { .. } => "text",
            Self::Paragraph => "paragraph",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Literal => "literal",
            Self::LiteralBlock { .. } => "literal_block",
            Self::BulletList => "bullet_list",
            Self::EnumeratedList => "enumerated_list",
            Self::ListItem => "list_item",
            Self::Image { .. } => "image",
            Self::Transition => "transition",
            Self::SlideBreak { .. } => "slide_break",
            Self::Interslide => "interslide",
            Self::SpeakerNote => "speaker_note",
            Self::Admonition { .. } => "admonition",
            Self::Sidebar => "sidebar",
            Self::Topic => "topic",
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Self::Section { .. })
    }

    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title { .. })
    }

    pub fn is_slide_break(&self) -> bool {
        matches!(self, Self::SlideBreak { .. })
    }

    /// Recorded depth, for the kinds that carry one
    pub fn depth(&self) -> Option<u32> {
        match self {
            Self::Section { depth, .. } | Self::Title { depth } | Self::SlideBreak { depth, .. } => {
                *depth
            }
            _ => None,
        }
    }

    /// Record a depth on kinds that carry one; other kinds are left alone
    pub fn set_depth(&mut self, value: u32) {
        match self {
            Self::Section { depth, .. } | Self::Title { depth } | Self::SlideBreak { depth, .. } => {
                *depth = Some(value)
            }
            _ => {}
        }
    }
}

/// Structural attributes shared by every node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Identifiers (the first one is rendered as `id`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    /// CSS classes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Passthrough markup attributes keyed by full attribute name
    /// (e.g. `data-background-color`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl Attributes {
    /// Attributes with a single class
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Default::default()
        }
    }

    /// Add a class unless it is already present
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    /// Set a passthrough attribute
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    /// Passthrough attributes that render as `data-*` markup attributes
    pub fn data_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data
            .iter()
            .filter(|(key, _)| key.starts_with("data-"))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// A node stored in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub attrs: Attributes,
    /// Non-owning back-reference; `None` for the root and detached nodes
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, attrs: Attributes) -> Self {
        Self {
            kind,
            attrs,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
