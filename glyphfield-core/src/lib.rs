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

//! Evaluation engine for a tick-driven, grid-based dataflow language.
//!
//! A program is a rectangular grid of single-character glyphs. Each
//! tick, every non-inert cell is visited once, in row-major order, and
//! dispatched to the behavior for its glyph; most behaviors read
//! neighboring cells and write to others, so a single tick can ripple
//! writes across the whole grid. [`engine::Engine`] owns the grid and
//! the scratch state a tick needs ([`mark::MarkPlane`], [`bank::Bank`],
//! [`vars::VarSlots`]) and drives that loop.

pub mod bank;
pub mod config;
pub mod engine;
pub mod event;
pub mod glyph;
pub mod grid;
pub mod mark;
mod ops;
pub mod piano;
pub mod vars;

pub use engine::Engine;
pub use event::{OutputEvent, OSC_INT_COUNT_MAX};
pub use grid::{Grid, GridLoadError};
pub use piano::PianoBits;
