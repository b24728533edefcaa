/*!
 * Core document model types shared by every codec.
 *
 * These types are JSON-serializable and hold the portable subset of subtitle
 * data: timing, cue-text trees, regions, inline cue settings and comments.
 */

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cue_text::Line;
use crate::errors::{Result, SubtitleError};
use crate::time::Timestamp;

/// Sparse positioning and formatting hints. Absent fields are never written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAttributes {
    /// Cue text alignment (`start`, `center`, `end`, `left`, `right`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,

    /// Cue line offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,

    /// Cue position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Cue box size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Vertical writing direction (`rl`, `lr`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,

    /// Region height in lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,

    /// Region anchor point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_anchor: Option<String>,

    /// Region scroll behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<String>,

    /// Viewport anchor point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_anchor: Option<String>,

    /// Region width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    /// Background colour hint for codecs that support one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Foreground colour hint for codecs that support one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
}

impl StyleAttributes {
    /// Whether no attribute is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Named on-screen placement that cues can reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier
    pub id: String,

    /// Positioning hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleAttributes>,
}

impl Region {
    /// Create a region without style hints
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            style: None,
        }
    }

    /// Attach style hints
    pub fn with_style(mut self, style: StyleAttributes) -> Self {
        self.style = Some(style);
        self
    }
}

/// Regions keyed by identifier, iterated in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Region>", into = "Vec<Region>")]
pub struct RegionMap {
    regions: Vec<Region>,
    index: HashMap<String, usize>,
}

impl RegionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region; identifiers must be unique
    pub fn insert(&mut self, region: Region) -> Result<()> {
        if self.index.contains_key(&region.id) {
            return Err(SubtitleError::DuplicateRegion(region.id));
        }
        self.index.insert(region.id.clone(), self.regions.len());
        self.regions.push(region);
        Ok(())
    }

    /// Look up a region
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.index.get(id).map(|&idx| &self.regions[idx])
    }

    /// Look up a region for modification. The identifier must not be changed.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Region> {
        self.index.get(id).map(|&idx| &mut self.regions[idx])
    }

    /// Whether a region with this identifier exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Keep only the regions matching the predicate, preserving order
    pub fn retain(&mut self, mut keep: impl FnMut(&Region) -> bool) {
        self.regions.retain(|region| keep(region));
        self.reindex();
    }

    /// Remove every region
    pub fn clear(&mut self) {
        self.regions.clear();
        self.index.clear();
    }

    fn reindex(&mut self) {
        self.index = self
            .regions
            .iter()
            .enumerate()
            .map(|(idx, region)| (region.id.clone(), idx))
            .collect();
    }
}

impl TryFrom<Vec<Region>> for RegionMap {
    type Error = SubtitleError;

    fn try_from(regions: Vec<Region>) -> Result<Self> {
        let mut map = RegionMap::new();
        for region in regions {
            map.insert(region)?;
        }
        Ok(map)
    }
}

impl From<RegionMap> for Vec<Region> {
    fn from(map: RegionMap) -> Self {
        map.regions
    }
}

impl<'a> IntoIterator for &'a RegionMap {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/// One timed subtitle entry.
///
/// Start and end are private so that `start <= end` holds after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    start: Timestamp,
    end: Timestamp,

    /// Rendered lines, each a cue-text tree
    pub lines: Vec<Line>,

    /// Identifier of the region this item belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Inline cue settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_style: Option<StyleAttributes>,

    /// Comments captured from preceding NOTE blocks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl Item {
    /// Create an item, rejecting `start > end`
    pub fn new(start: Timestamp, end: Timestamp, lines: Vec<Line>) -> Result<Self> {
        check_range(start, end)?;
        Ok(Self {
            start,
            end,
            lines,
            region: None,
            inline_style: None,
            comments: Vec::new(),
        })
    }

    /// Attach the item to a region
    pub fn with_region(mut self, id: impl Into<String>) -> Self {
        self.region = Some(id.into());
        self
    }

    /// Set inline cue settings
    pub fn with_inline_style(mut self, style: StyleAttributes) -> Self {
        self.inline_style = Some(style);
        self
    }

    /// Set comments
    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Time between start and end
    pub fn duration(&self) -> Timestamp {
        self.end - self.start
    }

    /// Replace both times, rejecting `start > end`
    pub fn set_times(&mut self, start: Timestamp, end: Timestamp) -> Result<()> {
        check_range(start, end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Move both times and any inline timestamps by a signed offset,
    /// clamping at zero
    pub fn shift(&mut self, delta_ms: i64) {
        self.start = self.start.shifted(delta_ms);
        self.end = self.end.shifted(delta_ms);
        for line in &mut self.lines {
            line.shift(delta_ms);
        }
    }

    /// Plain text of all lines joined by `" - "`
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

fn check_range(start: Timestamp, end: Timestamp) -> Result<()> {
    if start > end {
        return Err(SubtitleError::InvalidTimeRange { start, end });
    }
    Ok(())
}

/// Unchecked shape of `Item` used for deserialization
#[derive(Deserialize)]
struct ItemRecord {
    start: Timestamp,
    end: Timestamp,
    #[serde(default)]
    lines: Vec<Line>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    inline_style: Option<StyleAttributes>,
    #[serde(default)]
    comments: Vec<String>,
}

impl TryFrom<ItemRecord> for Item {
    type Error = SubtitleError;

    fn try_from(record: ItemRecord) -> Result<Self> {
        let mut item = Item::new(record.start, record.end, record.lines)?;
        item.region = record.region;
        item.inline_style = record.inline_style;
        item.comments = record.comments;
        Ok(item)
    }
}

/// Document-level data that belongs to no single item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Text following the `WEBVTT` signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// NOTE lines not followed by any cue.
    ///
    /// The WebVTT writer puts them right after the header, so reading that
    /// output back attaches them to the first item instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,

    /// Bodies of STYLE blocks, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style_sheets: Vec<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A complete subtitle document.
///
/// Items keep caller/parse order. Regions are owned here; items refer to them
/// by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRecord")]
pub struct Document {
    items: Vec<Item>,

    regions: RegionMap,

    /// Document-level metadata
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

/// Unchecked shape of `Document` used for deserialization
#[derive(Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    regions: RegionMap,
    #[serde(default)]
    metadata: Metadata,
}

impl TryFrom<DocumentRecord> for Document {
    type Error = SubtitleError;

    fn try_from(record: DocumentRecord) -> Result<Self> {
        let mut document = Document {
            items: Vec::with_capacity(record.items.len()),
            regions: record.regions,
            metadata: record.metadata,
        };
        for item in record.items {
            document.push_item(item)?;
        }
        Ok(document)
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item. A region reference must name a known region.
    pub fn push_item(&mut self, item: Item) -> Result<()> {
        if let Some(id) = &item.region {
            if !self.regions.contains(id) {
                return Err(SubtitleError::UnknownRegion(id.clone()));
            }
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove and return every item
    pub fn take_items(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    /// Register a region; fails on a duplicate identifier
    pub fn insert_region(&mut self, region: Region) -> Result<()> {
        self.regions.insert(region)
    }

    /// Look up a region by identifier
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Resolve an item's region reference
    pub fn region_of(&self, item: &Item) -> Option<&Region> {
        item.region.as_deref().and_then(|id| self.regions.get(id))
    }

    /// Shift every item by a signed millisecond offset
    pub fn shift(&mut self, delta_ms: i64) {
        for item in &mut self.items {
            item.shift(delta_ms);
        }
    }

    /// Latest end time, or zero for an empty document
    pub fn duration(&self) -> Timestamp {
        self.items
            .iter()
            .map(Item::end)
            .max()
            .unwrap_or(Timestamp::ZERO)
    }

    /// Stable sort of items by start time
    pub fn sort_by_start(&mut self) {
        self.items.sort_by_key(Item::start);
    }

    /// Append another document. Regions whose identifier already exists here
    /// are kept from `self`.
    pub fn merge(&mut self, other: Document) {
        for region in other.regions.regions {
            if !self.regions.contains(&region.id) {
                // Checked above, cannot collide
                let _ = self.regions.insert(region);
            }
        }
        self.items.extend(other.items);
        self.metadata.comments.extend(other.metadata.comments);
        self.metadata.style_sheets.extend(other.metadata.style_sheets);
        if self.metadata.title.is_none() {
            self.metadata.title = other.metadata.title;
        }
    }

    /// Drop regions, style sheets and inline settings, and flatten every
    /// line to plain text
    pub fn remove_styling(&mut self) {
        for item in &mut self.items {
            item.region = None;
            item.inline_style = None;
            for line in &mut item.lines {
                line.flatten();
            }
        }
        self.regions.clear();
        self.metadata.style_sheets.clear();
    }

    /// Remove regions no item references
    pub fn optimize(&mut self) {
        let before = self.regions.len();
        let items = &self.items;
        self.regions
            .retain(|region| items.iter().any(|item| item.region.as_deref() == Some(region.id.as_str())));
        debug!("Removed {} unused region(s)", before - self.regions.len());
    }
}
