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

//! The tick driver: advances a grid by one generation, dispatching
//! every non-inert cell exactly once in row-major order.

use log::trace;

use crate::bank::{Bank, BankCursor};
use crate::event::EventQueue;
use crate::glyph::INERT;
use crate::grid::Grid;
use crate::mark::MarkPlane;
use crate::ops::{dispatch, OpContext};
use crate::piano::PianoBits;
use crate::vars::VarSlots;

/// Owns everything a run needs across ticks: the grid itself plus the
/// per-tick scratch state (marks, bank, variable slots, event queue).
pub struct Engine {
    grid: Grid,
    marks: MarkPlane,
    bank: Bank,
    vars: VarSlots,
    events: EventQueue,
    tick_number: u64,
}

impl Engine {
    pub fn new(grid: Grid) -> Self {
        let (height, width) = (grid.height(), grid.width());
        Self {
            grid,
            marks: MarkPlane::new(height, width),
            bank: Bank::new(),
            vars: VarSlots::new(),
            events: EventQueue::new(),
            tick_number: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn tick_number(&self) -> u64 {
        self.tick_number
    }

    /// Replaces the grid in place (e.g. after an interactive edit),
    /// resizing the mark plane to match.
    pub fn set_grid(&mut self, grid: Grid) {
        self.marks.resize(grid.height(), grid.width());
        self.grid = grid;
    }

    /// Advances the simulation by one tick: clears per-tick scratch
    /// state, then dispatches every non-inert, non-blocked cell in
    /// row-major order. Returns the events emitted this tick.
    ///
    /// This is a pure function of the grid's contents, the tick
    /// number, and `piano_bits` — it never reads real time or any
    /// other ambient source of entropy.
    pub fn tick(&mut self, piano_bits: PianoBits) -> &EventQueue {
        trace!("tick {} starting", self.tick_number);
        self.marks.clear();
        self.events.clear();
        self.vars.reset();
        self.bank.reset();
        let mut cursor: BankCursor = 0;

        let height = self.grid.height();
        let width = self.grid.width();
        for y in 0..height {
            for x in 0..width {
                let glyph = self.grid.peek(y, x);
                if glyph == INERT {
                    continue;
                }
                let cell_flags = self.marks.get(y, x);
                let mut ctx = OpContext {
                    grid: &mut self.grid,
                    marks: &mut self.marks,
                    bank: &mut self.bank,
                    cursor: &mut cursor,
                    vars: &mut self.vars,
                    events: &mut self.events,
                    piano_bits,
                    tick_number: self.tick_number,
                    y,
                    x,
                    cell_flags,
                    glyph,
                };
                dispatch(&mut ctx);
            }
        }

        self.tick_number += 1;
        trace!(
            "tick {} finished with {} events",
            self.tick_number - 1,
            self.events.len()
        );
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_the_counter() {
        let mut engine = Engine::new(Grid::new(1, 1));
        assert_eq!(engine.tick_number(), 0);
        engine.tick(PianoBits::NONE);
        assert_eq!(engine.tick_number(), 1);
    }

    #[test]
    fn add_operator_fires_across_a_tick() {
        let grid = Grid::parse("A12\n...\n...\n").unwrap();
        let mut engine = Engine::new(grid);
        engine.tick(PianoBits::NONE);
        assert_eq!(engine.grid().peek(1, 0), b'3');
    }

    #[test]
    fn run_is_a_pure_function_of_grid_tick_and_piano_bits() {
        let grid_a = Grid::parse("A12\n...\n...\n").unwrap();
        let grid_b = Grid::parse("A12\n...\n...\n").unwrap();
        let mut engine_a = Engine::new(grid_a);
        let mut engine_b = Engine::new(grid_b);
        engine_a.tick(PianoBits::from_bits(5));
        engine_b.tick(PianoBits::from_bits(5));
        assert_eq!(engine_a.grid(), engine_b.grid());
    }
}
