/*!
 * Document model for subtitles.
 *
 * This module provides the aggregate every codec parses into and writes from:
 * - Ordered items with guarded timing
 * - Insertion-ordered regions referenced by identifier
 * - Document-level metadata (title, stray comments, style sheets)
 */

pub mod model;

pub use model::{Document, Item, Metadata, Region, RegionMap, StyleAttributes};
