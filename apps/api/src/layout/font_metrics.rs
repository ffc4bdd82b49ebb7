//! Glyph width tables and text measurement.
//!
//! All text handed to the layout engine is WinAnsi-encodable (see `fonts::sanitize`),
//! so a font's metrics are a flat table of 224 advance widths covering codes
//! 0x20..=0xFF, in 1/1000 em. A zero entry means the code has no glyph.
//! The built-in tables are the standard Helvetica AFM widths; embedded TrueType
//! fonts build the same table from their `hmtx` advances at load time.

use serde::{Deserialize, Serialize};

use crate::layout::fonts::encode_win_ansi;

/// The two weights the layout engine draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// First WinAnsi code covered by a width table.
pub const FIRST_CODE: u8 = 0x20;
/// Number of codes covered (0x20..=0xFF).
pub const CODE_COUNT: usize = 224;

/// Advance widths and vertical metrics for one font face.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetricTable {
    widths: [u16; CODE_COUNT],
    /// Ascender in 1/1000 em.
    pub ascent: i16,
    /// Descender in 1/1000 em (negative).
    pub descent: i16,
    pub cap_height: i16,
}

impl FontMetricTable {
    pub fn new(widths: [u16; CODE_COUNT], ascent: i16, descent: i16, cap_height: i16) -> Self {
        Self {
            widths,
            ascent,
            descent,
            cap_height,
        }
    }

    /// Width of a WinAnsi code in 1/1000 em; 0 when the code has no glyph.
    pub fn code_width(&self, code: u8) -> u16 {
        if code < FIRST_CODE {
            return 0;
        }
        self.widths[(code - FIRST_CODE) as usize]
    }

    /// Whether the face can draw `ch`.
    pub fn has_glyph(&self, ch: char) -> bool {
        encode_win_ansi(ch).is_some_and(|code| self.code_width(code) > 0)
    }

    /// Full width table, code 0x20 first.
    pub fn widths(&self) -> &[u16; CODE_COUNT] {
        &self.widths
    }

    /// Measures `text` in em units. Characters without a glyph measure zero.
    pub fn measure_em(&self, text: &str) -> f32 {
        text.chars()
            .filter_map(encode_win_ansi)
            .map(|code| self.code_width(code) as u32)
            .sum::<u32>() as f32
            / 1000.0
    }

    /// Measures `text` in points at `size`.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        self.measure_em(text) * size
    }

    /// Width of a single space in points at `size`.
    pub fn space_width(&self, size: f32) -> f32 {
        self.code_width(b' ') as f32 / 1000.0 * size
    }
}

/// Helvetica advance widths, 1/1000 em, WinAnsi codes 0x20..=0xFF.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 224] = [
     278,  278,  355,  556,  556,  889,  667,  191,  333,  333,  389,  584,  278,  333,  278,  278,  // 0x20
     556,  556,  556,  556,  556,  556,  556,  556,  556,  556,  278,  278,  584,  584,  584,  556,  // 0x30
    1015,  667,  667,  722,  722,  667,  611,  778,  722,  278,  500,  667,  556,  833,  722,  778,  // 0x40
     667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,  278,  278,  278,  469,  556,  // 0x50
     333,  556,  556,  500,  556,  556,  278,  556,  556,  222,  222,  500,  222,  833,  556,  556,  // 0x60
     556,  556,  333,  500,  278,  556,  500,  722,  500,  500,  500,  334,  260,  334,  584,    0,  // 0x70
     556,    0,  222,  556,  333, 1000,  556,  556,  333, 1000,  667,  333, 1000,    0,  611,    0,  // 0x80
       0,  222,  222,  333,  333,  350,  556, 1000,  333, 1000,  500,  333,  944,    0,  500,  667,  // 0x90
     278,  333,  556,  556,  556,  556,  260,  556,  333,  737,  370,  556,  584,  333,  737,  333,  // 0xA0
     400,  584,  333,  333,  333,  556,  537,  278,  333,  333,  365,  556,  834,  834,  834,  611,  // 0xB0
     667,  667,  667,  667,  667,  667, 1000,  722,  667,  667,  667,  667,  278,  278,  278,  278,  // 0xC0
     722,  722,  778,  778,  778,  778,  778,  584,  778,  722,  722,  722,  722,  667,  667,  611,  // 0xD0
     556,  556,  556,  556,  556,  556,  889,  500,  556,  556,  556,  556,  278,  278,  278,  278,  // 0xE0
     556,  556,  556,  556,  556,  556,  556,  584,  611,  556,  556,  556,  556,  500,  556,  500,  // 0xF0
];

/// Helvetica-Bold advance widths, 1/1000 em, WinAnsi codes 0x20..=0xFF.
#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 224] = [
     278,  333,  474,  556,  556,  889,  722,  238,  333,  333,  389,  584,  278,  333,  278,  278,  // 0x20
     556,  556,  556,  556,  556,  556,  556,  556,  556,  556,  333,  333,  584,  584,  584,  611,  // 0x30
     975,  722,  722,  722,  722,  667,  611,  778,  722,  278,  556,  722,  611,  833,  722,  778,  // 0x40
     667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,  333,  278,  333,  584,  556,  // 0x50
     333,  556,  611,  556,  611,  556,  333,  611,  611,  278,  278,  556,  278,  889,  611,  611,  // 0x60
     611,  611,  389,  556,  333,  611,  556,  778,  556,  556,  500,  389,  280,  389,  584,    0,  // 0x70
     556,    0,  278,  556,  500, 1000,  556,  556,  333, 1000,  667,  333, 1000,    0,  611,    0,  // 0x80
       0,  278,  278,  500,  500,  350,  556, 1000,  333, 1000,  556,  333,  944,    0,  500,  667,  // 0x90
     278,  333,  556,  556,  556,  556,  280,  556,  333,  737,  370,  556,  584,  333,  737,  333,  // 0xA0
     400,  584,  333,  333,  333,  611,  556,  278,  333,  333,  365,  556,  834,  834,  834,  611,  // 0xB0
     722,  722,  722,  722,  722,  722, 1000,  722,  667,  667,  667,  667,  278,  278,  278,  278,  // 0xC0
     722,  722,  778,  778,  778,  778,  778,  584,  778,  722,  722,  722,  722,  667,  667,  611,  // 0xD0
     556,  556,  556,  556,  556,  556,  889,  556,  556,  556,  556,  556,  278,  278,  278,  278,  // 0xE0
     611,  611,  611,  611,  611,  611,  611,  584,  611,  611,  611,  611,  611,  556,  611,  556,  // 0xF0
];

/// Built-in Helvetica metrics.
pub fn helvetica() -> FontMetricTable {
    FontMetricTable::new(HELVETICA_WIDTHS, 718, -207, 718)
}

/// Built-in Helvetica-Bold metrics.
pub fn helvetica_bold() -> FontMetricTable {
    FontMetricTable::new(HELVETICA_BOLD_WIDTHS, 718, -207, 718)
}
