/*!
 * WebVTT serialization.
 */

use crate::config::VoiceSpanMode;
use crate::cue_text::to_webvtt;
use crate::document::{Document, Item, Region, StyleAttributes};
use crate::errors::{Result, SubtitleError};
use crate::time::TimeFormat;

/// Render the whole document. Blocks are separated by one blank line and
/// the output ends with a single newline.
pub(crate) fn write_document(document: &Document, voice_spans: VoiceSpanMode) -> Result<String> {
    if document.is_empty() {
        return Err(SubtitleError::NoSubtitlesToWrite);
    }

    let mut blocks = Vec::with_capacity(document.len() + 1);

    blocks.push(match &document.metadata.title {
        Some(title) => format!("WEBVTT {}", title),
        None => "WEBVTT".to_string(),
    });

    if !document.metadata.comments.is_empty() {
        blocks.push(note_block(&document.metadata.comments));
    }
    blocks.extend(document.regions().iter().map(region_block));
    blocks.extend(
        document
            .metadata
            .style_sheets
            .iter()
            .map(|sheet| format!("STYLE\n{}", sheet)),
    );

    for (idx, item) in document.items().iter().enumerate() {
        if !item.comments.is_empty() {
            blocks.push(note_block(&item.comments));
        }
        blocks.push(cue_block(idx + 1, item, voice_spans));
    }

    let mut text = blocks.join("\n\n");
    text.push('\n');
    Ok(text)
}

fn note_block(comments: &[String]) -> String {
    format!("NOTE {}", comments.join("\n"))
}

fn region_block(region: &Region) -> String {
    let mut block = format!("REGION\nid:{}", region.id);
    if let Some(style) = &region.style {
        let settings = [
            ("width", style.width.clone()),
            ("lines", style.lines.map(|lines| lines.to_string())),
            ("regionanchor", style.region_anchor.clone()),
            ("viewportanchor", style.viewport_anchor.clone()),
            ("scroll", style.scroll.clone()),
        ];
        for (key, value) in settings {
            if let Some(value) = value {
                block.push_str(&format!("\n{}:{}", key, value));
            }
        }
    }
    block
}

fn cue_block(number: usize, item: &Item, voice_spans: VoiceSpanMode) -> String {
    let mut block = format!(
        "{}\n{} --> {}{}",
        number,
        item.start().format(TimeFormat::WebVtt),
        item.end().format(TimeFormat::WebVtt),
        cue_settings(item.inline_style.as_ref(), item.region.as_deref())
    );
    // A blank payload line would end the cue early
    for text in item.lines.iter().map(|line| to_webvtt(line, voice_spans)) {
        if !text.trim().is_empty() {
            block.push('\n');
            block.push_str(&text);
        }
    }
    block
}

/// Cue settings in a fixed order: align, line, position, region, size,
/// vertical
fn cue_settings(style: Option<&StyleAttributes>, region: Option<&str>) -> String {
    let style = style.map(|style| {
        [
            style.align.as_deref(),
            style.line.as_deref(),
            style.position.as_deref(),
            style.size.as_deref(),
            style.vertical.as_deref(),
        ]
    });
    let [align, line, position, size, vertical] = style.unwrap_or_default();
    let settings = [
        ("align", align),
        ("line", line),
        ("position", position),
        ("region", region),
        ("size", size),
        ("vertical", vertical),
    ];

    settings
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| format!(" {}:{}", key, value)))
        .collect()
}
