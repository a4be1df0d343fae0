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

//! The mark plane: one byte per cell, holding per-tick transient flags.

use bitflags::bitflags;

bitflags! {
    /// Per-cell transient flags. `LOCK` and `SLEEP` gate dispatch;
    /// `INPUT`/`OUTPUT`/`HASTE_INPUT` are hints for external tooling
    /// (port visualization) and carry no dispatch meaning themselves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Mark: u8 {
        /// This cell must not execute this tick.
        const LOCK         = 0b0000_0001;
        /// This cell was written this tick and must not execute.
        const SLEEP        = 0b0000_0010;
        const INPUT        = 0b0000_0100;
        const OUTPUT       = 0b0000_1000;
        const HASTE_INPUT  = 0b0001_0000;
    }
}

impl Mark {
    /// The flags that, if any are set, skip dispatch for a cell.
    pub const DISPATCH_BLOCKING: Mark = Mark::LOCK.union(Mark::SLEEP);

    pub fn blocks_dispatch(self) -> bool {
        self.intersects(Mark::DISPATCH_BLOCKING)
    }
}

/// Same shape as the grid: one [`Mark`] per cell, row-major.
#[derive(Debug, Clone)]
pub struct MarkPlane {
    width: usize,
    height: usize,
    cells: Vec<Mark>,
}

impl MarkPlane {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Mark::empty(); height * width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resets every cell to no flags set. Called once at the start of
    /// every tick.
    pub fn clear(&mut self) {
        self.cells.fill(Mark::empty());
    }

    /// Resizes (and clears) the plane to match a new grid shape.
    pub fn resize(&mut self, height: usize, width: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(height * width, Mark::empty());
    }

    fn in_bounds(&self, y: usize, x: usize) -> bool {
        y < self.height && x < self.width
    }

    pub fn get(&self, y: usize, x: usize) -> Mark {
        if !self.in_bounds(y, x) {
            return Mark::empty();
        }
        self.cells[y * self.width + x]
    }

    pub fn or_flags(&mut self, y: usize, x: usize, flags: Mark) {
        if !self.in_bounds(y, x) {
            return;
        }
        let idx = y * self.width + x;
        self.cells[idx] |= flags;
    }

    pub fn or_flags_relative(&mut self, y: usize, x: usize, dy: isize, dx: isize, flags: Mark) {
        let y0 = y as isize + dy;
        let x0 = x as isize + dx;
        if y0 < 0 || x0 < 0 || y0 as usize >= self.height || x0 as usize >= self.width {
            return;
        }
        self.or_flags(y0 as usize, x0 as usize, flags);
    }
}
