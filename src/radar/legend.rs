//! Legend layout: numbered, word-wrapped entry labels grouped by quadrant and ring.

use serde::Serialize;

use crate::config::RadarConfig;
use crate::fonts::TextMeasure;

use super::geometry::Point;
use super::layout::RadarLayout;
use super::ordering::{QUADRANT_COUNT, RING_COUNT};

pub const LEGEND_FONT_SIZE: f32 = 11.0;
pub const LEGEND_INDENT: f64 = 10.0;

const PARAGRAPH_GAP: f64 = 1.3;
const TITLE_RISE: f64 = 45.0;
const RING_HEADER_RISE: f64 = 16.0;
const ITEM_GAP: f64 = 2.0;
const RING_GROUP_GAP: f64 = 40.0;

/// One line of a wrapped legend label, offsets relative to the block origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendBlock {
    pub lines: Vec<LegendLine>,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapOptions {
    pub column_width: f64,
    pub line_height: f64,
    pub font_size: f32,
}

impl WrapOptions {
    pub fn from_config(config: &RadarConfig) -> Self {
        Self {
            column_width: config.legend_column_width,
            line_height: config.legend_line_height,
            font_size: LEGEND_FONT_SIZE,
        }
    }
}

/// Greedy word wrap of `"{id}. {label}"`.
///
/// Paragraphs are separated by runs of newlines. The first line starts at x = 0 and carries the
/// number; every other line is indented past it. Words are never split. A break is never taken
/// at a paragraph's second word, so the first two words of a paragraph share a line even when
/// they overflow. A first word that overflows on its own is moved below an empty line.
pub fn wrap_text<M: TextMeasure>(
    measure: &mut M,
    id: usize,
    label: &str,
    options: &WrapOptions,
) -> LegendBlock {
    let mut width_of =
        |text: &str| f64::from(measure.measure_text(text, options.font_size, false).0);

    let prefix = format!("{id}.");
    // Trailing spaces do not measure reliably; measure against a bar and subtract it.
    let number_width = width_of(&format!("{prefix} |")) - width_of("|");
    let continuation_x = number_width + LEGEND_INDENT;

    let full_text = format!("{prefix} {label}");

    let mut lines = Vec::new();
    let mut y = 0.0;
    for (p_index, paragraph) in split_paragraphs(&full_text).enumerate() {
        if p_index > 0 {
            y += options.line_height * PARAGRAPH_GAP;
        }
        let mut x = if p_index == 0 { 0.0 } else { continuation_x };
        let mut line: Vec<&str> = Vec::new();

        for (i, word) in paragraph.split_whitespace().enumerate() {
            line.push(word);
            if i != 1 && width_of(&line.join(" ")) > options.column_width {
                line.pop();
                lines.push(LegendLine {
                    text: line.join(" "),
                    x,
                    y,
                });
                y += options.line_height;
                x = continuation_x;
                line = vec![word];
            }
        }

        lines.push(LegendLine {
            text: line.join(" "),
            x,
            y,
        });
    }

    LegendBlock {
        lines,
        height: y + options.line_height,
    }
}

/// Split on runs of newlines. Whitespace-only paragraphs survive as empty lines; a trailing
/// newline leaves one empty paragraph at the end.
fn split_paragraphs(text: &str) -> impl Iterator<Item = &str> {
    let pieces: Vec<&str> = text.split('\n').collect();
    let last = pieces.len().saturating_sub(1);
    pieces
        .into_iter()
        .enumerate()
        .filter(move |(n, piece)| !piece.is_empty() || *n == last)
        .map(|(_, piece)| piece)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub index: usize,
    pub id: usize,
    pub origin: Point,
    pub block: LegendBlock,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingLegend {
    pub ring: usize,
    pub name: String,
    pub color: String,
    pub header: Point,
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantLegend {
    pub quadrant: usize,
    pub name: String,
    pub title: Point,
    pub rings: Vec<RingLegend>,
}

/// Legend for the whole radar, one column per quadrant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    pub quadrants: Vec<QuadrantLegend>,
}

impl Legend {
    pub fn item_count(&self) -> usize {
        self.quadrants
            .iter()
            .flat_map(|q| &q.rings)
            .map(|r| r.items.len())
            .sum()
    }
}

/// Stack every bucket's wrapped labels under its ring header, ring groups one after another.
pub fn layout_legend<M: TextMeasure>(
    config: &RadarConfig,
    layout: &RadarLayout,
    measure: &mut M,
) -> Legend {
    let options = WrapOptions::from_config(config);
    let line_step = config.legend_line_height + ITEM_GAP;

    let quadrants = (0..QUADRANT_COUNT)
        .map(|quadrant| {
            let offset = config.legend_offset[quadrant];
            let mut consumed = 0.0;

            let rings = (0..RING_COUNT)
                .map(|ring| {
                    let ring_shift = ring as f64;
                    let header = Point::new(
                        offset.x,
                        offset.y - RING_HEADER_RISE + ring_shift + consumed,
                    );

                    let mut cursor = offset.y + line_step + ring_shift + consumed;
                    let items: Vec<LegendItem> = layout
                        .buckets
                        .get(quadrant, ring)
                        .iter()
                        .map(|&index| {
                            let entry = &config.entries[index];
                            let id = layout.entries[index].id;
                            let block = wrap_text(&mut *measure, id, &entry.label, &options);
                            let origin = Point::new(offset.x, cursor);
                            cursor += block.height + ITEM_GAP;
                            LegendItem {
                                index,
                                id,
                                origin,
                                block,
                                link: entry.link.clone(),
                            }
                        })
                        .collect();

                    consumed += items
                        .iter()
                        .map(|item| item.block.height + ITEM_GAP)
                        .sum::<f64>()
                        + RING_GROUP_GAP;

                    let ring_config = &config.rings[ring];
                    RingLegend {
                        ring,
                        name: ring_config.name.clone(),
                        color: ring_config.color.clone(),
                        header,
                        items,
                    }
                })
                .collect();

            QuadrantLegend {
                quadrant,
                name: config.quadrants[quadrant].name.clone(),
                title: Point::new(offset.x, offset.y - TITLE_RISE),
                rings,
            }
        })
        .collect();

    Legend { quadrants }
}
