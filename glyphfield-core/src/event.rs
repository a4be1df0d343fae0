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

//! The output event queue: MIDI, OSC, and UDP events emitted by
//! operators during a tick.

/// Maximum number of integers an OSC-ints event can carry (bounded so
/// the wire encoding fits a fixed-size scratch buffer).
pub const OSC_INT_COUNT_MAX: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    MidiNote {
        channel: u8,
        octave: u8,
        note: u8,
        velocity: u8,
        bar_divisor: u8,
    },
    MidiCc {
        channel: u8,
        control: u8,
        value: u8,
    },
    MidiPitchBend {
        channel: u8,
        msb: u8,
        lsb: u8,
    },
    OscInts {
        address: u8,
        count: u8,
        numbers: [u8; OSC_INT_COUNT_MAX],
    },
    Udp {
        payload: Vec<u8>,
    },
}

impl OutputEvent {
    /// Encodes an [`OutputEvent::OscInts`] per OSC 1.0: the address
    /// byte as a one-character string, the comma-prefixed type tag
    /// `,iii...`, and the payload as big-endian `i32`s. Both string
    /// segments are null-terminated and then null-padded out to the
    /// next 4-byte boundary (not to a fixed 4 bytes). Returns `None`
    /// for non-OSC events.
    pub fn encode_osc(&self) -> Option<Vec<u8>> {
        let (address, count, numbers) = match self {
            OutputEvent::OscInts {
                address,
                count,
                numbers,
            } => (*address, *count, numbers),
            _ => return None,
        };
        let mut buf = Vec::new();
        write_padded_cstring(&mut buf, &[address]);

        let mut type_tag = Vec::with_capacity(1 + count as usize);
        type_tag.push(b',');
        type_tag.extend(std::iter::repeat(b'i').take(count as usize));
        write_padded_cstring(&mut buf, &type_tag);

        for &n in &numbers[..count as usize] {
            buf.extend_from_slice(&(n as i32).to_be_bytes());
        }
        Some(buf)
    }
}

/// Appends `bytes`, a null terminator, and enough additional zero
/// bytes to bring the total written length to a multiple of 4.
fn write_padded_cstring(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(bytes);
    buf.push(0);
    let pad = (4 - buf.len() % 4) % 4;
    buf.extend(std::iter::repeat(0).take(pad));
}

/// Append-only list of events emitted during a tick. Cleared at the
/// start of every tick by the driver.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<OutputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push(&mut self, event: OutputEvent) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[OutputEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_clears_between_ticks() {
        let mut q = EventQueue::new();
        q.push(OutputEvent::Udp { payload: vec![1] });
        q.clear();
        assert!(q.is_empty());
    }

    #[test]
    fn osc_encoding_is_four_byte_aligned_and_big_endian() {
        let mut numbers = [0u8; OSC_INT_COUNT_MAX];
        numbers[0] = 10;
        let event = OutputEvent::OscInts {
            address: b'x',
            count: 1,
            numbers,
        };
        let encoded = event.encode_osc().unwrap();
        assert_eq!(encoded.len() % 4, 0);
        // address "x" + NUL -> 2 bytes, padded to 4.
        assert_eq!(&encoded[0..4], &[b'x', 0, 0, 0]);
        // type tag ",i" + NUL -> 3 bytes, padded to 4.
        assert_eq!(&encoded[4..8], &[b',', b'i', 0, 0]);
        // one big-endian i32 payload of 10.
        assert_eq!(&encoded[8..12], &[0, 0, 0, 10]);
    }

    #[test]
    fn non_osc_event_has_no_osc_encoding() {
        let event = OutputEvent::Udp { payload: vec![] };
        assert!(event.encode_osc().is_none());
    }
}
