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

//! `C` clock, `D` delay, `F` if, `H` halt, `I` increment, `J` jump,
//! `K` kill, `L` loop, `U` uturn, `Y` jymper, `Z` zig.

use log::debug;

use crate::glyph::{glyph_of, INERT};
use crate::mark::Mark;

use super::context::OpContext;

fn is_movement_glyph(g: u8) -> bool {
    matches!(g, b'N' | b'n' | b'E' | b'e' | b'S' | b's' | b'W' | b'w')
}

pub fn clock(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let mod_num = ctx.index_of(0, 1) + 1;
    let rate = ctx.index_of(0, -1) + 1;
    let g = glyph_of((ctx.tick_number as usize / rate) % mod_num);
    ctx.poke(1, 0, g);
}

pub fn delay(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let offset = ctx.index_of(0, 1);
    let rate = ctx.index_of(0, -1) + 1;
    let g = if (ctx.tick_number as usize + offset) % rate == 0 {
        b'*'
    } else {
        INERT
    };
    ctx.poke(1, 0, g);
}

pub fn if_op(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 0, 2, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let g0 = ctx.peek(0, 1);
    let g1 = ctx.peek(0, 2);
    ctx.poke(1, 0, if g0 == g1 { b'*' } else { INERT });
}

pub fn halt(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 1, 0, Mark::OUTPUT);
}

pub fn increment(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, 1, Mark::INPUT);
    ctx.port(active, 0, 2, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::INPUT | Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let min = ctx.index_of(0, 1);
    let mut max = ctx.index_of(0, 2);
    let mut val = ctx.index_of(1, 0);
    val += 1;
    if max == 0 {
        max = 10;
    }
    if val >= max {
        val = min;
    }
    ctx.poke(1, 0, glyph_of(val));
}

pub fn jump(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, -1, 0, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let g = ctx.peek(-1, 0);
    ctx.poke(1, 0, g);
}

pub fn kill(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 1, 0, Mark::OUTPUT | Mark::HASTE_INPUT);

    if !active {
        return;
    }
    if ctx.is_awake() {
        ctx.poke(1, 0, INERT);
    }
}

pub fn loop_op(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    if ctx.is_awake() && active {
        let len = ctx.index_of(0, -1) + 1;
        ctx.bank_store(&[len as i32]);
        let width = ctx.grid.width();
        let clamped = len.min(width.saturating_sub(ctx.x + 1));
        for i in 0..clamped {
            ctx.lock(0, (i + 1) as isize);
        }
    }
    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let mut data = [0i32; 1];
    if !ctx.bank_load(&mut data) || data[0] < 0 {
        debug!("loop at ({}, {}) dropped a stale persisted length", ctx.y, ctx.x);
        return;
    }
    let width = ctx.grid.width();
    let mut len = (data[0] as usize).min(width.saturating_sub(ctx.x + 1));
    if len == 0 {
        return;
    }
    if len > 36 {
        debug!("loop at ({}, {}) clamped its window from {} to 36", ctx.y, ctx.x, len);
        len = 36;
    }

    let mut buf = [INERT; 36];
    let hopped = ctx.peek(0, 1);
    for i in 0..len {
        buf[i] = ctx.peek(0, (i + 2) as isize);
    }
    buf[len - 1] = hopped;
    for i in 0..len {
        ctx.poke(0, (i + 1) as isize, buf[i]);
        ctx.stun(0, (i + 1) as isize);
    }
}

const UTURN_DATA: [(isize, isize, u8); 4] = [
    (-1, 0, b'N'),
    (0, -1, b'W'),
    (0, 1, b'E'),
    (1, 0, b'S'),
];

pub fn uturn(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    for &(dy, dx, _) in UTURN_DATA.iter() {
        ctx.port(
            active,
            dy,
            dx,
            Mark::INPUT | Mark::OUTPUT | Mark::HASTE_INPUT | Mark::LOCK,
        );
    }

    if !ctx.is_awake() || !active {
        return;
    }
    for &(dy, dx, replacement) in UTURN_DATA.iter() {
        let g = ctx.peek(dy, dx);
        if is_movement_glyph(g) {
            ctx.poke(dy, dx, replacement);
        }
    }
}

/// `W(1,0, R(0,-1))`.
pub fn jymper(ctx: &mut OpContext) {
    let active = ctx.dual_is_active();
    ctx.port(active, 0, -1, Mark::INPUT);
    ctx.port(active, 1, 0, Mark::OUTPUT);

    if !ctx.is_awake() || !active {
        return;
    }
    let g = ctx.peek(0, -1);
    ctx.poke(1, 0, g);
}

pub fn zig(ctx: &mut OpContext) {
    if !ctx.is_awake() {
        return;
    }
    if !ctx.dual_is_active() {
        return;
    }
    let width = ctx.grid.width();
    let this_glyph = ctx.glyph;
    ctx.poke(0, 0, INERT);
    if ctx.x + 1 == width {
        return;
    }
    if ctx.peek(0, 1) == INERT {
        ctx.poke(0, 1, this_glyph);
        ctx.stun(0, 1);
        return;
    }
    let n = ctx.x.min(256);
    for i in 0..n {
        if ctx.peek(0, -(i as isize) - 1) != INERT {
            ctx.poke(0, -(i as isize), this_glyph);
            break;
        }
    }
}
