/*!
 * Cue-text serializer.
 *
 * Sibling nodes are separated by one space (text leaves are trimmed on
 * parse), except right after an inline timestamp. In `VoiceSpanMode::Merged`
 * the first voice name of the line is written once as `<v NAME>` at the start
 * and every voice span is otherwise transparent, so
 * `<v Joe>Hi</v> <v Bob>Yo</v>` becomes `<v Joe>Hi Yo`.
 */

use super::{Line, Node, Span};
use crate::config::VoiceSpanMode;
use crate::escape::escape;
use crate::time::TimeFormat;

/// Output grammar
#[derive(Debug, Clone, Copy)]
enum Flavor {
    WebVtt(VoiceSpanMode),
    Srt { formatting_tags: bool },
}

impl Flavor {
    fn writes_tag(self, span: &Span) -> bool {
        match self {
            Flavor::WebVtt(VoiceSpanMode::Merged) => !span.is_voice(),
            Flavor::WebVtt(VoiceSpanMode::Strict) => true,
            Flavor::Srt { formatting_tags } => {
                formatting_tags && matches!(span.name.as_str(), "b" | "i" | "u")
            }
        }
    }
}

enum Step<'a> {
    Node(&'a Node),
    Close(&'a Span),
    Space,
}

/// Render a line as WebVTT cue text
pub fn to_webvtt(line: &Line, mode: VoiceSpanMode) -> String {
    let mut out = String::new();
    if mode == VoiceSpanMode::Merged {
        if let Some(voice) = line.voice_name() {
            out.push_str("<v ");
            out.push_str(&escape(voice));
            out.push('>');
        }
    }
    render(line, Flavor::WebVtt(mode), &mut out);
    out
}

/// Render a line as SRT text.
///
/// Text is written verbatim. With `formatting_tags`, `<b>`, `<i>` and `<u>`
/// spans keep their tags; every other span contributes only its text.
pub fn to_srt(line: &Line, formatting_tags: bool) -> String {
    let mut out = String::new();
    render(line, Flavor::Srt { formatting_tags }, &mut out);
    out
}

fn render(line: &Line, flavor: Flavor, out: &mut String) {
    let mut steps = Vec::new();
    push_children(&mut steps, &line.nodes);

    while let Some(step) = steps.pop() {
        match step {
            Step::Space => out.push(' '),
            Step::Close(span) => {
                out.push_str("</");
                out.push_str(&span.name);
                out.push('>');
            }
            Step::Node(Node::Text(text)) => match flavor {
                Flavor::WebVtt(_) => out.push_str(&escape(text)),
                Flavor::Srt { .. } => out.push_str(text),
            },
            Step::Node(Node::Timestamp(ts)) => {
                if let Flavor::WebVtt(_) = flavor {
                    out.push('<');
                    out.push_str(&ts.format(TimeFormat::WebVtt));
                    out.push('>');
                }
            }
            Step::Node(Node::Span(span)) => {
                if flavor.writes_tag(span) {
                    write_open_tag(span, flavor, out);
                    steps.push(Step::Close(span));
                }
                push_children(&mut steps, &span.children);
            }
        }
    }
}

/// Queue children so the first one is popped first
fn push_children<'a>(steps: &mut Vec<Step<'a>>, children: &'a [Node]) {
    for (idx, child) in children.iter().enumerate().rev() {
        steps.push(Step::Node(child));
        if idx > 0 && !matches!(children[idx - 1], Node::Timestamp(_)) {
            steps.push(Step::Space);
        }
    }
}

fn write_open_tag(span: &Span, flavor: Flavor, out: &mut String) {
    out.push('<');
    out.push_str(&span.name);
    if let Flavor::WebVtt(_) = flavor {
        for class in &span.classes {
            out.push('.');
            out.push_str(class);
        }
        if let Some(annotation) = &span.annotation {
            out.push(' ');
            out.push_str(&escape(annotation));
        }
    }
    out.push('>');
}
