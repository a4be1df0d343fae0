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

//! The shared context threaded through every operator's port
//! declaration and execution phases during a single cell's dispatch.

use crate::bank::{Bank, BankCursor};
use crate::event::EventQueue;
use crate::glyph::{glyph_of, glyphs_add, index_of, is_uppercase, BANG};
use crate::grid::Grid;
use crate::mark::{Mark, MarkPlane};
use crate::piano::PianoBits;
use crate::vars::VarSlots;

/// Bundles everything an operator needs to read its neighbors, write
/// its outputs, and persist a value between its port-declaration and
/// execution phases, for one cell in one tick.
pub struct OpContext<'a> {
    pub grid: &'a mut Grid,
    pub marks: &'a mut MarkPlane,
    pub bank: &'a mut Bank,
    pub cursor: &'a mut BankCursor,
    pub vars: &'a mut VarSlots,
    pub events: &'a mut EventQueue,
    pub piano_bits: PianoBits,
    pub tick_number: u64,
    pub y: usize,
    pub x: usize,
    pub cell_flags: Mark,
    pub glyph: u8,
}

impl<'a> OpContext<'a> {
    pub fn peek(&self, dy: isize, dx: isize) -> u8 {
        self.grid.peek_relative(self.y, self.x, dy, dx)
    }

    pub fn poke(&mut self, dy: isize, dx: isize, g: u8) {
        self.grid.poke_relative(self.y, self.x, dy, dx, g);
    }

    /// Writes a glyph and marks the destination cell asleep so it
    /// doesn't also execute this tick.
    pub fn poke_stunned(&mut self, dy: isize, dx: isize, g: u8) {
        self.grid.poke_relative(self.y, self.x, dy, dx, g);
        self.marks
            .or_flags_relative(self.y, self.x, dy, dx, Mark::SLEEP);
    }

    pub fn stun(&mut self, dy: isize, dx: isize) {
        self.marks
            .or_flags_relative(self.y, self.x, dy, dx, Mark::SLEEP);
    }

    pub fn lock(&mut self, dy: isize, dx: isize) {
        self.marks
            .or_flags_relative(self.y, self.x, dy, dx, Mark::LOCK);
    }

    /// Declares a port hint at `(dy, dx)` if `enabled` and this cell is
    /// awake. `flags` are toggled against `Mark::LOCK`: most ports are
    /// locked by default (so their glyph doesn't also dispatch as an
    /// operator), so passing `Mark::LOCK` in `flags` cancels that
    /// default and leaves the port unlocked.
    pub fn port(&mut self, enabled: bool, dy: isize, dx: isize, flags: Mark) {
        if enabled && !self.cell_flags.blocks_dispatch() {
            self.marks
                .or_flags_relative(self.y, self.x, dy, dx, flags ^ Mark::LOCK);
        }
    }

    pub fn is_awake(&self) -> bool {
        !self.cell_flags.blocks_dispatch()
    }

    pub fn has_neighboring_bang(&self) -> bool {
        self.peek(0, 1) == BANG
            || self.peek(0, -1) == BANG
            || self.peek(1, 0) == BANG
            || self.peek(-1, 0) == BANG
    }

    /// An operator's dual-case glyph is "active" this tick if it's
    /// written uppercase or a neighboring cell holds a bang.
    pub fn dual_is_active(&self) -> bool {
        is_uppercase(self.glyph) || self.has_neighboring_bang()
    }

    fn bank_key(&self) -> u32 {
        (self.y * self.grid.width() + self.x) as u32
    }

    pub fn bank_store(&mut self, vals: &[i32]) {
        let key = self.bank_key();
        self.bank.store_coords(key, vals);
    }

    pub fn bank_load(&mut self, out: &mut [i32]) -> bool {
        let key = self.bank_key();
        self.bank.load_coords(self.cursor, key, out)
    }

    pub fn index_of(&self, dy: isize, dx: isize) -> usize {
        index_of(self.peek(dy, dx))
    }

    pub fn glyphs_add(&self, a: u8, b: u8) -> u8 {
        glyphs_add(a, b)
    }

    pub fn glyph_of(&self, i: usize) -> u8 {
        glyph_of(i)
    }
}
