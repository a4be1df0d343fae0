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

//! The piano-input bitset: externally-held input keys consumed by the
//! `!` (keys) operator.

use crate::glyph::index_of;

/// A 32-bit set of currently-held input keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PianoBits(u32);

impl PianoBits {
    pub const NONE: PianoBits = PianoBits(0);

    pub fn from_bits(bits: u32) -> Self {
        PianoBits(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn with_key_held(self, g: u8) -> Self {
        PianoBits(self.0 | piano_bits_of(g).0)
    }

    pub fn intersects(self, other: PianoBits) -> bool {
        self.0 & other.0 != 0
    }
}

/// Maps a key glyph to its bit in the piano bitset: `1 << (index_of(g)
/// - 1)` for `index_of(g)` in `1..=32` (glyph index 0, i.e. `.`, and
/// indices above 32 hold no key), keeping the mapping consistent with
/// the base-36 indexing and the 32-bit width of the bitset.
pub fn piano_bits_of(g: u8) -> PianoBits {
    let idx = index_of(g);
    if idx == 0 || idx > 32 {
        return PianoBits::NONE;
    }
    PianoBits(1u32 << (idx - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inert_glyph_has_no_key() {
        assert_eq!(piano_bits_of(b'.'), PianoBits::NONE);
    }

    #[test]
    fn held_key_is_detected() {
        let held = PianoBits::NONE.with_key_held(b'1');
        assert!(held.intersects(piano_bits_of(b'1')));
        assert!(!held.intersects(piano_bits_of(b'2')));
    }

    #[test]
    fn glyphs_beyond_32_bits_have_no_key() {
        // index_of('z') == 35, out of range for a 32-bit bitset.
        assert_eq!(piano_bits_of(b'z'), PianoBits::NONE);
    }
}
