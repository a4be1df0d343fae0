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

//! Per-tick scratch store keyed by cell index.
//!
//! Operators that need to agree on a value between their port
//! declaration and their execution phase (e.g. the coordinates `G`
//! persists from the neighbors it read to the cells it eventually
//! writes) stash that value here during declaration and read it back
//! during execution. Entries are appended in dispatch order and read
//! back with a cursor that only ever advances, so each operator is
//! guaranteed to find its own entry before any later operator's.

/// Entries are appended in the same order operators are visited in a
/// tick and are never removed mid-tick; [`Bank::reset`] drops them all
/// at once between ticks.
#[derive(Debug, Clone, Default)]
pub struct Bank {
    /// `(cell_index, payload)` pairs in append order.
    entries: Vec<(u32, Vec<u8>)>,
}

/// A forward-only read position into a [`Bank`]. Resets to 0 between
/// ticks; never rewinds within a tick.
pub type BankCursor = usize;

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all entries and rewinds every cursor. Called once at the
    /// start of every tick.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Appends a `size`-byte payload under `key` (the cell's
    /// `y * width + x` index). `size` must fit in a `u8`, matching the
    /// C original's `Bank_entry::size` field.
    pub fn append(&mut self, key: u32, bytes: &[u8]) {
        debug_assert!(bytes.len() <= u8::MAX as usize);
        self.entries.push((key, bytes.to_vec()));
    }

    /// Advances `cursor` forward through entries until one with
    /// matching `key` is found, copies up to `out.len()` payload bytes
    /// into `out`, and returns the number copied (0 if none found).
    /// The cursor never rewinds.
    pub fn read(&self, cursor: &mut BankCursor, key: u32, out: &mut [u8]) -> usize {
        while *cursor < self.entries.len() {
            let (entry_key, payload) = &self.entries[*cursor];
            *cursor += 1;
            if *entry_key == key {
                let n = payload.len().min(out.len());
                out[..n].copy_from_slice(&payload[..n]);
                return n;
            }
        }
        0
    }

    /// Convenience for the common case of storing/loading a fixed-size
    /// array of `i32` coordinates, matching how most bank-backed
    /// operators (`G`, `O`, `P`, `Q`, `T`, `X`) use it.
    pub fn store_coords(&mut self, key: u32, coords: &[i32]) {
        let bytes: Vec<u8> = coords.iter().flat_map(|c| c.to_le_bytes()).collect();
        self.append(key, &bytes);
    }

    pub fn load_coords(&self, cursor: &mut BankCursor, key: u32, out: &mut [i32]) -> bool {
        let mut bytes = vec![0u8; out.len() * 4];
        let n = self.read(cursor, key, &mut bytes);
        if n != bytes.len() {
            return false;
        }
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            out[i] = i32::from_le_bytes(chunk.try_into().unwrap());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_stored_value() {
        let mut bank = Bank::new();
        bank.append(5, &[1, 2, 3]);
        let mut cursor = 0;
        let mut out = [0u8; 3];
        assert_eq!(bank.read(&mut cursor, 5, &mut out), 3);
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn cursor_only_advances_forward() {
        let mut bank = Bank::new();
        bank.append(1, &[9]);
        bank.append(2, &[8]);
        let mut cursor = 0;
        let mut out = [0u8; 1];
        assert_eq!(bank.read(&mut cursor, 2, &mut out), 1);
        assert_eq!(out, [8]);
        // key 1 is behind the cursor now and will not be found again.
        assert_eq!(bank.read(&mut cursor, 1, &mut out), 0);
    }

    #[test]
    fn missing_key_returns_zero() {
        let bank = Bank::new();
        let mut cursor = 0;
        let mut out = [0u8; 1];
        assert_eq!(bank.read(&mut cursor, 42, &mut out), 0);
    }

    #[test]
    fn reset_clears_entries() {
        let mut bank = Bank::new();
        bank.append(1, &[1]);
        bank.reset();
        let mut cursor = 0;
        let mut out = [0u8; 1];
        assert_eq!(bank.read(&mut cursor, 1, &mut out), 0);
    }

    #[test]
    fn coords_round_trip() {
        let mut bank = Bank::new();
        bank.store_coords(7, &[3, -1, 10]);
        let mut cursor = 0;
        let mut out = [0i32; 3];
        assert!(bank.load_coords(&mut cursor, 7, &mut out));
        assert_eq!(out, [3, -1, 10]);
    }
}
