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

//! `N`/`E`/`S`/`W` movement, `*` bang, `#` comment, and `!` keys.

use log::debug;

use crate::glyph::{is_lowercase, lowered, BANG, INERT};
use crate::mark::Mark;

use super::context::OpContext;

/// Shared behavior for the four movement glyphs (and their lowercase,
/// bang-gated forms). `ctx.glyph` carries which direction.
pub fn movement(ctx: &mut OpContext) {
    if ctx.cell_flags.blocks_dispatch() {
        return;
    }
    if is_lowercase(ctx.glyph) && !ctx.has_neighboring_bang() {
        return;
    }

    let (dy, dx): (isize, isize) = match lowered(ctx.glyph) {
        b'n' => (-1, 0),
        b'e' => (0, 1),
        b's' => (1, 0),
        b'w' => (0, -1),
        _ => (0, 0),
    };

    let height = ctx.grid.height() as isize;
    let width = ctx.grid.width() as isize;
    let y0 = ctx.y as isize + dy;
    let x0 = ctx.x as isize + dx;
    if y0 < 0 || x0 < 0 || y0 >= height || x0 >= width {
        debug!("movement at ({}, {}) dropped an out-of-range destination", ctx.y, ctx.x);
        ctx.poke(0, 0, BANG);
        return;
    }

    if ctx.peek(dy, dx) == INERT {
        let self_glyph = ctx.glyph;
        ctx.poke(dy, dx, self_glyph);
        ctx.poke(0, 0, INERT);
        ctx.stun(dy, dx);
    } else {
        ctx.poke(0, 0, BANG);
    }
}

pub fn keys(ctx: &mut OpContext) {
    ctx.port(true, 0, 1, Mark::INPUT);
    ctx.port(true, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() {
        return;
    }
    let g = ctx.peek(0, 1);
    let pb = crate::piano::piano_bits_of(g);
    if pb.bits() == 0 {
        return;
    }
    let o = if ctx.piano_bits.intersects(pb) {
        b'*'
    } else {
        INERT
    };
    ctx.poke(1, 0, o);
}

/// Locks the rest of the comment run, from the cell after `#` up to
/// (and including) the closing `#` or the end of the row, whichever
/// comes first, within a 255-cell span.
pub fn comment(ctx: &mut OpContext) {
    if !ctx.is_awake() {
        return;
    }
    let width = ctx.grid.width();
    let max_x = (ctx.x + 255).min(width);
    if ctx.x + 255 > width {
        debug!("comment at ({}, {}) clamped its run to the grid's width", ctx.y, ctx.x);
    }
    for x0 in (ctx.x + 1)..max_x {
        let g = ctx.grid.peek(ctx.y, x0);
        ctx.marks.or_flags(ctx.y, x0, Mark::LOCK);
        if g == b'#' {
            break;
        }
    }
}

pub fn bang(ctx: &mut OpContext) {
    if ctx.is_awake() {
        ctx.poke(0, 0, INERT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Bank;
    use crate::event::EventQueue;
    use crate::grid::Grid;
    use crate::mark::MarkPlane;
    use crate::piano::PianoBits;
    use crate::vars::VarSlots;

    fn ctx_for<'a>(
        grid: &'a mut Grid,
        marks: &'a mut MarkPlane,
        bank: &'a mut Bank,
        cursor: &'a mut usize,
        vars: &'a mut VarSlots,
        events: &'a mut EventQueue,
        y: usize,
        x: usize,
        glyph: u8,
    ) -> OpContext<'a> {
        OpContext {
            grid,
            marks,
            bank,
            cursor,
            vars,
            events,
            piano_bits: PianoBits::NONE,
            tick_number: 0,
            y,
            x,
            cell_flags: Mark::empty(),
            glyph,
        }
    }

    #[test]
    fn uppercase_east_moves_into_empty_cell() {
        let mut grid = Grid::new(1, 3);
        grid.poke(0, 0, b'E');
        let mut marks = MarkPlane::new(1, 3);
        let mut bank = Bank::new();
        let mut cursor = 0;
        let mut vars = VarSlots::new();
        let mut events = EventQueue::new();
        {
            let mut ctx = ctx_for(
                &mut grid, &mut marks, &mut bank, &mut cursor, &mut vars, &mut events, 0, 0, b'E',
            );
            movement(&mut ctx);
        }
        assert_eq!(grid.peek(0, 0), INERT);
        assert_eq!(grid.peek(0, 1), b'E');
        assert!(marks.get(0, 1).contains(Mark::SLEEP));
    }

    #[test]
    fn movement_blocked_by_neighbor_turns_into_bang() {
        let mut grid = Grid::new(1, 3);
        grid.poke(0, 0, b'E');
        grid.poke(0, 1, b'A');
        let mut marks = MarkPlane::new(1, 3);
        let mut bank = Bank::new();
        let mut cursor = 0;
        let mut vars = VarSlots::new();
        let mut events = EventQueue::new();
        {
            let mut ctx = ctx_for(
                &mut grid, &mut marks, &mut bank, &mut cursor, &mut vars, &mut events, 0, 0, b'E',
            );
            movement(&mut ctx);
        }
        assert_eq!(grid.peek(0, 0), b'*');
    }

    #[test]
    fn lowercase_movement_requires_neighboring_bang() {
        let mut grid = Grid::new(1, 3);
        grid.poke(0, 0, b'e');
        let mut marks = MarkPlane::new(1, 3);
        let mut bank = Bank::new();
        let mut cursor = 0;
        let mut vars = VarSlots::new();
        let mut events = EventQueue::new();
        {
            let mut ctx = ctx_for(
                &mut grid, &mut marks, &mut bank, &mut cursor, &mut vars, &mut events, 0, 0, b'e',
            );
            movement(&mut ctx);
        }
        assert_eq!(grid.peek(0, 0), b'e');
    }

    #[test]
    fn comment_locks_until_closing_hash() {
        let mut grid = Grid::new(1, 5);
        grid.poke(0, 0, b'#');
        grid.poke(0, 1, b'a');
        grid.poke(0, 2, b'#');
        grid.poke(0, 3, b'b');
        let mut marks = MarkPlane::new(1, 5);
        let mut bank = Bank::new();
        let mut cursor = 0;
        let mut vars = VarSlots::new();
        let mut events = EventQueue::new();
        {
            let mut ctx = ctx_for(
                &mut grid, &mut marks, &mut bank, &mut cursor, &mut vars, &mut events, 0, 0, b'#',
            );
            comment(&mut ctx);
        }
        assert!(marks.get(0, 1).contains(Mark::LOCK));
        assert!(marks.get(0, 2).contains(Mark::LOCK));
        assert!(!marks.get(0, 3).contains(Mark::LOCK));
    }
}
