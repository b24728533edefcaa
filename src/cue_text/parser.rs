/*!
 * Cue-text parser.
 *
 * Tags are matched against an explicit stack of open spans:
 * - spans still open at the end of the payload are closed implicitly
 * - a closing tag that does not name the innermost open span is dropped
 * - unknown tag names become generic spans
 */

use log::{debug, trace};

use super::{Line, Node, Span};
use crate::escape::unescape;
use crate::time::{TimeFormat, Timestamp};

/// Parse one payload line into a tree of cue-text nodes. Never fails.
pub fn parse_line(payload: &str) -> Line {
    let mut builder = TreeBuilder::default();
    let mut rest = payload;

    while let Some(open) = rest.find('<') {
        builder.push_text(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('>') {
            Some(close) if is_tag_start(after) => {
                builder.tag(&after[..close]);
                rest = &after[close + 1..];
            }
            Some(0) => {
                // "<>" carries nothing
                rest = &after[1..];
            }
            _ => {
                // Not a tag, keep the '<' as text
                builder.push_text("<");
                rest = after;
            }
        }
    }
    builder.push_text(rest);

    builder.finish()
}

fn is_tag_start(body: &str) -> bool {
    body.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '/' || c == '_')
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Span>,
    pending: String,
}

impl TreeBuilder {
    fn push_text(&mut self, raw: &str) {
        self.pending.push_str(raw);
    }

    fn flush_text(&mut self) {
        let trimmed = self.pending.trim();
        if !trimmed.is_empty() {
            let text = unescape(trimmed).into_owned();
            self.container().push(Node::Text(text));
        }
        self.pending.clear();
    }

    fn container(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(span) => &mut span.children,
            None => &mut self.root,
        }
    }

    fn tag(&mut self, body: &str) {
        self.flush_text();

        if let Some(name) = body.strip_prefix('/') {
            self.close(name.trim());
        } else if body.starts_with(|c: char| c.is_ascii_digit()) {
            match Timestamp::parse(body, TimeFormat::WebVtt) {
                Ok(ts) => self.container().push(Node::Timestamp(ts)),
                Err(_) => debug!("Dropping malformed timestamp tag <{}>", body),
            }
        } else {
            self.open.push(open_span(body));
        }
    }

    fn close(&mut self, name: &str) {
        // "</c.yellow>" closes "c"
        let name = name.split('.').next().unwrap_or(name);

        let matches_top = self.open.last().is_some_and(|top| top.name == name);
        if matches_top {
            self.close_top();
        } else {
            trace!("Ignoring mismatched closing tag </{}>", name);
        }
    }

    fn close_top(&mut self) {
        if let Some(span) = self.open.pop() {
            self.container().push(Node::Span(span));
        }
    }

    fn finish(mut self) -> Line {
        self.flush_text();
        while !self.open.is_empty() {
            self.close_top();
        }
        Line::new(self.root)
    }
}

/// Split `name.class1.class2 annotation` into a span
fn open_span(body: &str) -> Span {
    let (head, annotation) = match body.find(char::is_whitespace) {
        Some(idx) => (&body[..idx], body[idx..].trim()),
        None => (body, ""),
    };

    let mut parts = head.split('.');
    let name = parts.next().unwrap_or_default();
    let classes: Vec<&str> = parts.filter(|class| !class.is_empty()).collect();

    let mut span = Span::new(name).with_classes(classes);
    if !annotation.is_empty() {
        span.annotation = Some(unescape(annotation).into_owned());
    }
    span
}
