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

//! `G` generator, `O` offset, `P` push, `Q` query, `T` track,
//! `X` teleport, `V` variable — the bank-backed operators that need to
//! agree on a value between their port-declaration and execution
//! phases.

use log::debug;

use crate::glyph::INERT;
use crate::mark::Mark;
use crate::vars::VarSlots;

use super::context::OpContext;

pub fn generator(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    let mut data = [0i32; 3]; // x, y, len
    if ctx.is_awake() && active {
        data[0] = ctx.index_of(0, -3) as i32;
        data[1] = ctx.index_of(0, -2) as i32;
        data[2] = ctx.index_of(0, -1) as i32;
        ctx.bank_store(&data);
    }

    ctx.port(active, 0, -3, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, -2, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    let out_x = data[0];
    let out_y = data[1] + 1;
    let len = data[2] + 1;
    for i in 0..len {
        ctx.port(active, 0, (i + 1) as isize, Mark::INPUT);
        ctx.port(
            active,
            out_y as isize,
            (out_x + i) as isize,
            Mark::OUTPUT | Mark::LOCK,
        );
    }

    if !ctx.is_awake() || !active {
        return;
    }
    if ctx.bank_load(&mut data) {
        let out_x = data[0];
        let out_y = data[1] + 1;
        let len = data[2] + 1;
        for i in 0..len {
            let g = ctx.peek(0, (i + 1) as isize);
            ctx.poke_stunned(out_y as isize, (out_x + i) as isize, g);
        }
    } else {
        debug!("generator at ({}, {}) dropped a stale persisted coordinate", ctx.y, ctx.x);
    }
}

pub fn offset(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    let mut coords = [0i32, 1i32]; // y, x
    if ctx.is_awake() && active {
        coords[0] = ctx.index_of(0, -1) as i32;
        coords[1] = ctx.index_of(0, -2) as i32 + 1;
        ctx.bank_store(&coords);
    }

    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, -2, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, coords[0] as isize, coords[1] as isize, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    if !ctx.bank_load(&mut coords) {
        debug!("offset at ({}, {}) fell back to its default coordinate", ctx.y, ctx.x);
        coords = [0, 1];
    }
    let g = ctx.peek(coords[0] as isize, coords[1] as isize);
    ctx.poke(1, 0, g);
}

pub fn push(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    let mut write_val_x = [0i32];
    if ctx.is_awake() && active {
        let len = ctx.index_of(0, -1) + 1;
        let key = ctx.index_of(0, -2);
        write_val_x[0] = (key % len) as i32;
        ctx.bank_store(&write_val_x);
        for i in 0..len {
            ctx.lock(1, i as isize);
        }
    }

    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, -2, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 1, write_val_x[0] as isize, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    if !ctx.bank_load(&mut write_val_x) {
        debug!("push at ({}, {}) fell back to column 0", ctx.y, ctx.x);
        write_val_x[0] = 0;
    }
    let g = ctx.peek(0, 1);
    ctx.poke(1, write_val_x[0] as isize, g);
}

pub fn query(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    let mut data = [0i32; 3]; // x, y, len
    if ctx.is_awake() && active {
        data[0] = ctx.index_of(0, -3) as i32;
        data[1] = ctx.index_of(0, -2) as i32;
        data[2] = ctx.index_of(0, -1) as i32;
        ctx.bank_store(&data);
    }

    ctx.port(active, 0, -3, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, -2, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    let in_x = data[0] + 1;
    let in_y = data[1];
    let len = data[2] + 1;
    let out_x = 1 - len;
    for i in 0..len {
        ctx.port(active, in_y as isize, (in_x + i) as isize, Mark::INPUT);
        ctx.port(active, 1, (out_x + i) as isize, Mark::OUTPUT);
    }

    if !ctx.is_awake() || !active {
        return;
    }
    if ctx.bank_load(&mut data) {
        let in_x = data[0] + 1;
        let in_y = data[1];
        let len = data[2] + 1;
        let out_x = 1 - len;
        // query copies without stunning, unlike the other bank-backed
        // copy operators: a queried value may legitimately be read
        // again later in the same tick.
        for i in 0..len {
            let g = ctx.peek(in_y as isize, (in_x + i) as isize);
            ctx.poke(1, (out_x + i) as isize, g);
        }
    } else {
        debug!("query at ({}, {}) dropped a stale persisted coordinate", ctx.y, ctx.x);
    }
}

pub fn track(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    let mut read_val_x: isize = 1;
    if ctx.is_awake() {
        let len = ctx.index_of(0, -1) + 1;
        let key = ctx.index_of(0, -2);
        read_val_x = (key % len) as isize + 1;
        ctx.bank_store(&[read_val_x as i32]);
        for i in 0..len {
            ctx.lock(0, (i + 1) as isize);
        }
    }

    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, -2, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, read_val_x, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let mut ival = [0i32];
    if !ctx.bank_load(&mut ival) {
        debug!("track at ({}, {}) fell back to offset 1", ctx.y, ctx.x);
        ival[0] = 1;
    }
    let g = ctx.peek(0, ival[0] as isize);
    ctx.poke(1, 0, g);
}

pub fn teleport(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    let mut coords = [1i32, 0i32]; // y, x
    if ctx.is_awake() {
        coords[0] = ctx.index_of(0, -1) as i32 + 1;
        coords[1] = ctx.index_of(0, -2) as i32;
        ctx.bank_store(&coords);
    }

    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, -2, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(
        active,
        coords[0] as isize,
        coords[1] as isize,
        Mark::OUTPUT | Mark::LOCK,
    );

    if !ctx.is_awake() || !active {
        return;
    }
    if !ctx.bank_load(&mut coords) {
        debug!("teleport at ({}, {}) fell back to its default coordinate", ctx.y, ctx.x);
        coords = [1, 0];
    }
    let g = ctx.peek(0, 1);
    ctx.poke_stunned(coords[0] as isize, coords[1] as isize, g);
}

pub fn variable(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if ctx.is_awake() && active {
        let left = ctx.peek(0, -1);
        if let Some(_idx) = VarSlots::index_of_letter(left) {
            let right = ctx.peek(0, 1);
            if right != INERT {
                ctx.vars.set(left, right);
            }
        }
    }

    if !ctx.is_awake() || !active {
        return;
    }
    let left = ctx.peek(0, -1);
    if left != INERT {
        return;
    }
    let right = ctx.peek(0, 1);
    let Some(result) = ctx.vars.get(right) else {
        return;
    };
    if result == INERT {
        return;
    }
    ctx.poke(1, 0, result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Bank;
    use crate::event::EventQueue;
    use crate::grid::Grid;
    use crate::mark::MarkPlane;
    use crate::piano::PianoBits;

    fn tick(
        height: usize,
        width: usize,
        y: usize,
        x: usize,
        glyph: u8,
        set_up: impl Fn(&mut Grid),
        op: impl Fn(&mut OpContext),
    ) -> Grid {
        let mut grid = Grid::new(height, width);
        set_up(&mut grid);
        grid.poke(y, x, glyph);
        let mut marks = MarkPlane::new(height, width);
        let mut bank = Bank::new();
        let mut cursor = 0;
        let mut vars = VarSlots::new();
        let mut events = EventQueue::new();
        {
            let mut ctx = OpContext {
                grid: &mut grid,
                marks: &mut marks,
                bank: &mut bank,
                cursor: &mut cursor,
                vars: &mut vars,
                events: &mut events,
                piano_bits: PianoBits::NONE,
                tick_number: 0,
                y,
                x,
                cell_flags: Mark::empty(),
                glyph,
            };
            op(&mut ctx);
        }
        grid
    }

    #[test]
    fn offset_reads_through_a_computed_coordinate() {
        let grid = tick(
            3,
            5,
            1,
            2,
            b'O',
            |g| {
                g.poke(1, 1, b'1'); // y offset input -> 1
                g.poke(1, 0, b'0'); // x offset input -> 1
                g.poke(2, 3, b'Z'); // value at (y+1, x+1) = (2,3)
            },
            offset,
        );
        assert_eq!(grid.peek(2, 2), b'Z');
    }

    #[test]
    fn push_writes_to_a_computed_column() {
        let grid = tick(
            3,
            5,
            1,
            2,
            b'P',
            |g| {
                g.poke(1, 1, b'2'); // len - 1 -> len = 3
                g.poke(1, 0, b'1'); // key -> 1
                g.poke(1, 3, b'Q'); // value to push
            },
            push,
        );
        // key % len = 1 % 3 = 1, so the write lands one column right of x
        assert_eq!(grid.peek(2, 3), b'Q');
    }

    #[test]
    fn variable_write_sets_a_named_slot() {
        let mut grid = Grid::new(3, 5);
        grid.poke(1, 2, b'V');
        grid.poke(1, 1, b'a'); // left neighbor names the slot to write
        grid.poke(1, 3, b'9'); // right neighbor is the value
        let mut marks = MarkPlane::new(3, 5);
        let mut bank = Bank::new();
        let mut cursor = 0;
        let mut vars = VarSlots::new();
        let mut events = EventQueue::new();
        {
            let mut ctx = OpContext {
                grid: &mut grid,
                marks: &mut marks,
                bank: &mut bank,
                cursor: &mut cursor,
                vars: &mut vars,
                events: &mut events,
                piano_bits: PianoBits::NONE,
                tick_number: 0,
                y: 1,
                x: 2,
                cell_flags: Mark::empty(),
                glyph: b'V',
            };
            variable(&mut ctx);
        }
        assert_eq!(vars.get(b'a'), Some(b'9'));
    }

    #[test]
    fn variable_read_outputs_a_named_slot() {
        let mut grid = Grid::new(3, 5);
        grid.poke(1, 2, b'V');
        grid.poke(1, 3, b'b'); // right neighbor names the slot to read
        let mut marks = MarkPlane::new(3, 5);
        let mut bank = Bank::new();
        let mut cursor = 0;
        let mut vars = VarSlots::new();
        vars.set(b'b', b'7');
        let mut events = EventQueue::new();
        {
            let mut ctx = OpContext {
                grid: &mut grid,
                marks: &mut marks,
                bank: &mut bank,
                cursor: &mut cursor,
                vars: &mut vars,
                events: &mut events,
                piano_bits: PianoBits::NONE,
                tick_number: 0,
                y: 1,
                x: 2,
                cell_flags: Mark::empty(),
                glyph: b'V',
            };
            variable(&mut ctx);
        }
        assert_eq!(grid.peek(2, 2), b'7');
    }
}
