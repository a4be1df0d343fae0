/*
Copyright 2020 Anish Jewalikar

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Glyph arithmetic: the base-36 indexing used by most operators.

/// The inert glyph. Empty cells hold this value.
pub const INERT: u8 = b'.';

/// The bang glyph. Clears itself on execution, triggers neighboring
/// operators that only act when banged.
pub const BANG: u8 = b'*';

const INDEXED_GLYPHS: [u8; 36] = *b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lowest/highest valid glyph byte. Widened to start at `!` rather than
/// `#`, since `!` is itself an assigned operator glyph (`keys`) and a
/// valid-range lower bound above it would normalize every `keys`
/// operator out of a loaded grid.
pub const GLYPH_RANGE: std::ops::RangeInclusive<u8> = b'!'..=b'~';

/// True if `b` is in the printable-ASCII range this language accepts
/// as a grid cell. Bytes outside this range are normalized to `.` (or
/// `!` for display) by loaders.
pub fn is_valid_glyph(b: u8) -> bool {
    GLYPH_RANGE.contains(&b)
}

/// Maps `.` -> 0, `0..=9` -> 0..=9, `A..=Z`/`a..=z` -> 10..=35, and any
/// other byte -> 0. Intentionally branchy rather than a bit-twiddling
/// lookup; it never returns an out-of-range index.
pub fn index_of(g: u8) -> usize {
    match g {
        b'.' => 0,
        b'0'..=b'9' => (g - b'0') as usize,
        b'A'..=b'Z' => (g - b'A' + 10) as usize,
        b'a'..=b'z' => (g - b'a' + 10) as usize,
        _ => 0,
    }
}

/// Inverse of [`index_of`]. `i` is taken modulo 36, so callers never
/// need to pre-clamp arithmetic results.
pub fn glyph_of(i: usize) -> u8 {
    INDEXED_GLYPHS[i % INDEXED_GLYPHS.len()]
}

/// `glyph_of((index_of(a) + index_of(b)) % 36)`.
pub fn glyphs_add(a: u8, b: u8) -> u8 {
    glyph_of(index_of(a) + index_of(b))
}

/// Standard ASCII lowercase bit.
const CASE_BIT: u8 = 0x20;

pub fn is_uppercase(g: u8) -> bool {
    g.is_ascii_uppercase()
}

pub fn is_lowercase(g: u8) -> bool {
    g.is_ascii_lowercase()
}

/// Sets the lowercase bit unconditionally. Only meaningful for ASCII
/// alphabetic glyphs; callers only use this on glyphs already known to
/// be letters (e.g. before matching a movement direction).
pub fn lowered(g: u8) -> u8 {
    g | CASE_BIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_known_glyphs() {
        assert_eq!(index_of(b'.'), 0);
        assert_eq!(index_of(b'0'), 0);
        assert_eq!(index_of(b'9'), 9);
        assert_eq!(index_of(b'A'), 10);
        assert_eq!(index_of(b'a'), 10);
        assert_eq!(index_of(b'Z'), 35);
        assert_eq!(index_of(b'z'), 35);
    }

    #[test]
    fn glyph_arithmetic_round_trip() {
        for i in 0..36 {
            assert_eq!(index_of(glyph_of(i)), i);
        }
    }

    #[test]
    fn add_wraps_modulo_36() {
        assert_eq!(glyphs_add(b'z', b'1'), b'0');
        assert_eq!(glyphs_add(b'2', b'3'), b'5');
    }

    #[test]
    fn case_helpers() {
        assert!(is_uppercase(b'N'));
        assert!(!is_uppercase(b'n'));
        assert!(is_lowercase(b'n'));
        assert_eq!(lowered(b'N'), b'n');
    }

    #[test]
    fn invalid_glyph_indexes_to_zero() {
        assert_eq!(index_of(b'^'), 0);
    }
}
