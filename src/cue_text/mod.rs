/*!
 * Inline cue-text markup.
 *
 * A cue payload line is parsed into a small tree of nodes:
 * - `Node::Text`: literal text, stored unescaped
 * - `Node::Span`: a tag such as `<i>`, `<c.yellow>`, `<lang en>` or `<v Roger>`
 *   with its class list, optional annotation and children
 * - `Node::Timestamp`: an inline karaoke timestamp such as `<00:00:01.500>`
 *
 * `parser` builds the tree with an explicit open-span stack and `serializer`
 * writes it back as WebVTT markup or SRT text.
 */

pub mod parser;
pub mod serializer;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

pub use parser::parse_line;
pub use serializer::{to_srt, to_webvtt};

/// Tag name of a voice span
pub const VOICE_TAG: &str = "v";

/// One node of a cue-text tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// Literal text, unescaped
    Text(String),
    /// Formatting, class, language, voice or custom span
    Span(Span),
    /// Inline timestamp tag
    Timestamp(Timestamp),
}

impl Node {
    /// Text leaf helper
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A tagged span with its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Tag name (`v`, `i`, `c`, `lang`, or anything custom)
    pub name: String,

    /// Dotted class list, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    /// Text after the tag name; the speaker for voice spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,

    /// Nested nodes
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Span {
    /// Create an empty span with the given tag name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            annotation: None,
            children: Vec::new(),
        }
    }

    /// Create a voice span for a speaker
    pub fn voice(speaker: impl Into<String>) -> Self {
        Self::new(VOICE_TAG).with_annotation(speaker)
    }

    /// Set the annotation
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Set the class list
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the children
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Whether this is a `<v>` span
    pub fn is_voice(&self) -> bool {
        self.name == VOICE_TAG
    }

    /// Speaker name of a voice span
    pub fn voice_name(&self) -> Option<&str> {
        if self.is_voice() {
            self.annotation.as_deref()
        } else {
            None
        }
    }
}

impl From<Span> for Node {
    fn from(span: Span) -> Self {
        Node::Span(span)
    }
}

/// One rendered line of a cue: an ordered list of top-level nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line {
    /// Top-level nodes
    pub nodes: Vec<Node>,
}

impl Line {
    /// Create a line from nodes
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// A line holding a single text leaf
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::Text(text.into())],
        }
    }

    /// Whether the line has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First voice name found walking the tree in document order
    pub fn voice_name(&self) -> Option<&str> {
        self.walk().find_map(|node| match node {
            Node::Span(span) => span.voice_name(),
            _ => None,
        })
    }

    /// Text leaves joined by single spaces, markup removed
    pub fn plain_text(&self) -> String {
        self.walk()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace all markup with a single text leaf
    pub fn flatten(&mut self) {
        let text = self.plain_text();
        self.nodes = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::Text(text)]
        };
    }

    /// Move every inline timestamp by a signed offset, clamping at zero
    pub fn shift(&mut self, delta_ms: i64) {
        let mut stack: Vec<&mut Node> = self.nodes.iter_mut().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Timestamp(ts) => *ts = ts.shifted(delta_ms),
                Node::Span(span) => stack.extend(span.children.iter_mut()),
                Node::Text(_) => {}
            }
        }
    }

    /// Depth-first, pre-order iterator over every node
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.nodes.iter().rev().collect(),
        }
    }
}

/// Pre-order iterator over a line's nodes
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        if let Node::Span(span) = node {
            self.stack.extend(span.children.iter().rev());
        }
        Some(node)
    }
}
