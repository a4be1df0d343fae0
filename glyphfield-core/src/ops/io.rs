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

//! `:` full MIDI note, `@` MIDI CC, `%` mono MIDI note, `?` MIDI pitch
//! bend, `=` OSC integers, `;` raw UDP payload — the output-only
//! operators. None of these have a lowercase form; they always declare
//! their ports and only actually emit when banged.

use log::debug;

use crate::event::{OutputEvent, OSC_INT_COUNT_MAX};
use crate::glyph::index_of;
use crate::mark::Mark;

use super::context::OpContext;

fn midi_note_number_of(g: u8) -> Option<u8> {
    match g {
        b'C' => Some(0),
        b'c' => Some(1),
        b'D' => Some(2),
        b'd' => Some(3),
        b'E' => Some(4),
        b'F' => Some(5),
        b'f' => Some(6),
        b'G' => Some(7),
        b'g' => Some(8),
        b'A' => Some(9),
        b'a' => Some(10),
        b'B' => Some(11),
        _ => None,
    }
}

/// Scales a glyph's base-36 index to a MIDI 0-127 range. Glyphs
/// `0..=9` scale linearly across `[1, 127]`; `a..=z` continue the
/// scale but with a documented quirk carried over unchanged: index 10
/// (the glyph right after `9`) always scales to 0, not a small
/// positive value, and everything from index 35 up clamps to 127.
fn midi_velocity_of(g: u8) -> u8 {
    let n = index_of(g);
    if n < 10 {
        return (n * 14 + 1) as u8;
    }
    let n = n - 10;
    if n == 0 {
        return 0;
    }
    if n >= 26 {
        return 127;
    }
    (n * 5 - 3) as u8
}

fn usz_clamp(val: usize, min: usize, max: usize) -> usize {
    val.clamp(min, max)
}

/// `:` — a full MIDI note: channel, octave, note letter, velocity, and
/// a bar-divisor length.
pub fn midi_note(ctx: &mut OpContext) {
    for i in 1..6isize {
        ctx.port(true, 0, i, Mark::INPUT);
    }
    if !ctx.is_awake() || !ctx.has_neighboring_bang() {
        return;
    }
    let channel_g = ctx.peek(0, 1);
    let octave_g = ctx.peek(0, 2);
    let note_g = ctx.peek(0, 3);
    let velocity_g = ctx.peek(0, 4);
    let length_g = ctx.peek(0, 5);

    let octave_num = index_of(octave_g);
    if octave_num == 0 {
        debug!("midi note at ({}, {}) dropped: octave index 0", ctx.y, ctx.x);
        return;
    }
    let Some(note_num) = midi_note_number_of(note_g) else {
        debug!("midi note at ({}, {}) dropped: '{}' isn't a note letter", ctx.y, ctx.x, note_g as char);
        return;
    };
    let channel_num = index_of(channel_g).min(15);

    ctx.events.push(OutputEvent::MidiNote {
        channel: channel_num as u8,
        octave: usz_clamp(octave_num, 1, 9) as u8,
        note: note_num,
        velocity: midi_velocity_of(velocity_g),
        bar_divisor: usz_clamp(index_of(length_g), 1, 36) as u8,
    });
}

/// `@` — MIDI control-change: channel, controller number, value.
pub fn midi_cc(ctx: &mut OpContext) {
    for i in 1..4isize {
        ctx.port(true, 0, i, Mark::INPUT);
    }
    if !ctx.is_awake() || !ctx.has_neighboring_bang() {
        return;
    }
    let channel_g = ctx.peek(0, 1);
    let control_g = ctx.peek(0, 2);
    let value_g = ctx.peek(0, 3);
    ctx.events.push(OutputEvent::MidiCc {
        channel: index_of(channel_g).min(15) as u8,
        control: index_of(control_g).min(119) as u8,
        value: midi_velocity_of(value_g),
    });
}

/// `%` — a single-channel MIDI note with no bar-divisor field (always
/// emitted with `bar_divisor = 1`).
pub fn midi_mono_note(ctx: &mut OpContext) {
    for i in 1..5isize {
        ctx.port(true, 0, i, Mark::INPUT);
    }
    if !ctx.is_awake() || !ctx.has_neighboring_bang() {
        return;
    }
    let channel_g = ctx.peek(0, 1);
    let octave_g = ctx.peek(0, 2);
    let note_g = ctx.peek(0, 3);
    let velocity_g = ctx.peek(0, 4);

    let octave_num = index_of(octave_g);
    if octave_num == 0 {
        debug!("mono midi note at ({}, {}) dropped: octave index 0", ctx.y, ctx.x);
        return;
    }
    let Some(note_num) = midi_note_number_of(note_g) else {
        debug!("mono midi note at ({}, {}) dropped: '{}' isn't a note letter", ctx.y, ctx.x, note_g as char);
        return;
    };
    let channel_num = index_of(channel_g).min(15);

    ctx.events.push(OutputEvent::MidiNote {
        channel: channel_num as u8,
        octave: usz_clamp(octave_num, 1, 9) as u8,
        note: note_num,
        velocity: midi_velocity_of(velocity_g),
        bar_divisor: 1,
    });
}

/// `?` — a MIDI pitch bend: channel, most- and least-significant 7-bit
/// bytes of the 14-bit bend value.
pub fn midi_pitch_bend(ctx: &mut OpContext) {
    for i in 1..4isize {
        ctx.port(true, 0, i, Mark::INPUT);
    }
    if !ctx.is_awake() || !ctx.has_neighboring_bang() {
        return;
    }
    let channel_g = ctx.peek(0, 1);
    let msb_g = ctx.peek(0, 2);
    let lsb_g = ctx.peek(0, 3);
    ctx.events.push(OutputEvent::MidiPitchBend {
        channel: index_of(channel_g).min(15) as u8,
        msb: midi_velocity_of(msb_g),
        lsb: midi_velocity_of(lsb_g),
    });
}

/// `=` — an OSC integer-array event. The left neighbor is the OSC
/// address byte; the one before it is the count (`index + 1`,
/// clamped); the `count` cells to the right are the integer payload.
pub fn osc(ctx: &mut OpContext) {
    ctx.port(true, 0, -2, Mark::INPUT | Mark::HASTE_INPUT);
    ctx.port(true, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    let requested_len = index_of(ctx.peek(0, -1)) + 1;
    let len = requested_len.min(OSC_INT_COUNT_MAX);
    if requested_len > OSC_INT_COUNT_MAX {
        debug!(
            "osc at ({}, {}) clamped its payload count from {} to {}",
            ctx.y, ctx.x, requested_len, OSC_INT_COUNT_MAX
        );
    }
    for i in 0..len {
        ctx.port(true, 0, (i + 1) as isize, Mark::INPUT);
    }

    if !ctx.is_awake() || !ctx.has_neighboring_bang() {
        return;
    }
    let address = ctx.peek(0, -2);
    if address == crate::glyph::INERT {
        debug!("osc at ({}, {}) dropped: no address selector", ctx.y, ctx.x);
        return;
    }
    let len = (index_of(ctx.peek(0, -1)) + 1).min(OSC_INT_COUNT_MAX);
    let mut numbers = [0u8; OSC_INT_COUNT_MAX];
    for (i, slot) in numbers.iter_mut().enumerate().take(len) {
        *slot = index_of(ctx.peek(0, (i + 1) as isize)) as u8;
    }
    ctx.events.push(OutputEvent::OscInts {
        address,
        count: len as u8,
        numbers,
    });
}

/// `;` — a raw UDP datagram. The west neighbor gives the payload
/// length; the `len` cells east of the operator are the payload bytes,
/// each taken as its base-36 index.
pub fn udp(ctx: &mut OpContext) {
    let active = ctx.has_neighboring_bang();
    ctx.port(active, 0, -1, Mark::INPUT | Mark::HASTE_INPUT);
    let len = index_of(ctx.peek(0, -1)) + 1;
    for i in 0..len {
        ctx.port(active, 0, (i + 1) as isize, Mark::INPUT);
    }

    if !ctx.is_awake() || !active {
        return;
    }
    let len = index_of(ctx.peek(0, -1)) + 1;
    let mut payload = Vec::with_capacity(len);
    for i in 0..len {
        payload.push(index_of(ctx.peek(0, (i + 1) as isize)) as u8);
    }
    ctx.events.push(OutputEvent::Udp { payload });
}
