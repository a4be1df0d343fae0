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

//! `A` add, `B` subtract, `M` multiply, `R` random.

use crate::glyph::glyph_of;
use crate::mark::Mark;

use super::context::OpContext;

pub fn add(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 0, 2, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let result = ctx.glyphs_add(ctx.peek(0, 1), ctx.peek(0, 2));
    ctx.poke(1, 0, result);
}

/// `|index(R1) - index(R2)|`.
pub fn subtract(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 0, 2, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let a = ctx.index_of(0, 1) as isize;
    let b = ctx.index_of(0, 2) as isize;
    ctx.poke(1, 0, glyph_of((a - b).unsigned_abs()));
}

/// `(index(R1) * index(R2)) mod 36`.
pub fn multiply(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 0, 2, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let a = ctx.index_of(0, 1);
    let b = ctx.index_of(0, 2);
    ctx.poke(1, 0, glyph_of(a * b));
}

fn hash32_shift_mult(key: u32) -> u32 {
    const C2: u32 = 0x27d4_eb2d;
    let mut key = (key ^ 61) ^ (key >> 16);
    key = key.wrapping_add(key << 3);
    key ^= key >> 4;
    key = key.wrapping_mul(C2);
    key ^= key >> 15;
    key
}

pub fn random(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 0, 2, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let a = ctx.index_of(0, 1);
    let b = ctx.index_of(0, 2);
    if a == b {
        ctx.poke(1, 0, glyph_of(a));
        return;
    }
    let (min, max) = if a < b { (a, b) } else { (b, a) };
    let width = ctx.grid.width() as u32;
    let key = (ctx.y as u32 * width + ctx.x as u32) ^ ((ctx.tick_number as u32) << 16);
    let hashed = hash32_shift_mult(key);
    let val = (hashed as usize) % (max + 1 - min) + min;
    ctx.poke(1, 0, glyph_of(val));
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

    fn run(y: usize, x: usize, glyph: u8, set_up: impl FnOnce(&mut Grid)) -> Grid {
        let mut grid = Grid::new(3, 4);
        set_up(&mut grid);
        grid.poke(y, x, glyph);
        let mut marks = MarkPlane::new(3, 4);
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
                tick_number: 7,
                y,
                x,
                cell_flags: Mark::empty(),
                glyph,
            };
            match glyph {
                b'A' => add(&mut ctx),
                b'B' => subtract(&mut ctx),
                b'M' => multiply(&mut ctx),
                b'R' => random(&mut ctx),
                _ => unreachable!(),
            }
        }
        grid
    }

    #[test]
    fn add_sums_indices() {
        let grid = run(1, 1, b'A', |g| {
            g.poke(1, 2, b'2');
            g.poke(1, 3, b'3');
        });
        assert_eq!(grid.peek(2, 1), b'5');
    }

    #[test]
    fn subtract_takes_the_absolute_difference() {
        let grid = run(1, 1, b'B', |g| {
            g.poke(1, 2, b'2');
            g.poke(1, 3, b'7');
        });
        assert_eq!(grid.peek(2, 1), b'5');
    }

    #[test]
    fn multiply_multiplies_indices() {
        let grid = run(1, 1, b'M', |g| {
            g.poke(1, 2, b'2');
            g.poke(1, 3, b'3');
        });
        assert_eq!(grid.peek(2, 1), b'6');
    }

    #[test]
    fn random_with_equal_bounds_is_deterministic() {
        let grid = run(1, 1, b'R', |g| {
            g.poke(1, 2, b'5');
            g.poke(1, 3, b'5');
        });
        assert_eq!(grid.peek(2, 1), b'5');
    }

    #[test]
    fn random_output_is_within_bounds() {
        let grid = run(1, 1, b'R', |g| {
            g.poke(1, 2, b'1');
            g.poke(1, 3, b'3');
        });
        let out = grid.peek(2, 1);
        assert!(out == b'1' || out == b'2' || out == b'3');
    }
}
