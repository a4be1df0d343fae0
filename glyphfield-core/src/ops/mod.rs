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

//! The operator catalogue and its glyph dispatch table.

mod arithmetic;
mod context;
mod control;
mod io;
mod memory;
mod movement;

pub use context::OpContext;

/// Runs the operator behavior for `ctx.glyph` against `ctx`. Cells
/// holding the inert glyph are skipped by the caller before this is
/// reached. Unknown glyphs (anything valid but unassigned) are no-ops.
pub fn dispatch(ctx: &mut OpContext) {
    match ctx.glyph {
        b'N' | b'n' | b'E' | b'e' | b'S' | b's' | b'W' | b'w' => movement::movement(ctx),
        b'!' => movement::keys(ctx),
        b'#' => movement::comment(ctx),
        b'*' => movement::bang(ctx),
        b':' => io::midi_note(ctx),
        b'@' => io::midi_cc(ctx),
        b'%' => io::midi_mono_note(ctx),
        b'?' => io::midi_pitch_bend(ctx),
        b'=' => io::osc(ctx),
        b';' => io::udp(ctx),
        b'A' | b'a' => arithmetic::add(ctx),
        b'B' | b'b' => arithmetic::subtract(ctx),
        b'C' | b'c' => control::clock(ctx),
        b'D' | b'd' => control::delay(ctx),
        b'F' | b'f' => control::if_op(ctx),
        b'G' | b'g' => memory::generator(ctx),
        b'H' | b'h' => control::halt(ctx),
        b'I' | b'i' => control::increment(ctx),
        b'J' | b'j' => control::jump(ctx),
        b'K' | b'k' => control::kill(ctx),
        b'L' | b'l' => control::loop_op(ctx),
        b'M' | b'm' => arithmetic::multiply(ctx),
        b'O' | b'o' => memory::offset(ctx),
        b'P' | b'p' => memory::push(ctx),
        b'Q' | b'q' => memory::query(ctx),
        b'R' | b'r' => arithmetic::random(ctx),
        b'T' | b't' => memory::track(ctx),
        b'U' | b'u' => control::uturn(ctx),
        b'V' | b'v' => memory::variable(ctx),
        b'X' | b'x' => memory::teleport(ctx),
        b'Y' | b'y' => control::jymper(ctx),
        b'Z' | b'z' => control::zig(ctx),
        _ => {}
    }
}
