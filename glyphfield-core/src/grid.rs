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

//! The grid plane: a rectangular array of glyphs, plus its text format.

use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::glyph::{is_valid_glyph, INERT};

/// Declared coordinate maxima. Grids larger than this in either
/// dimension are rejected by the loader; `height * width` is
/// guaranteed to fit in a `u32` index as long as both stay under this
/// bound.
pub const Y_MAX: usize = 1024;
pub const X_MAX: usize = 1024;

/// Errors from loading a grid from its text representation.
#[derive(Debug, Error)]
pub enum GridLoadError {
    #[error("couldn't open grid file")]
    CantOpenFile(#[from] std::io::Error),
    #[error("row has too many columns")]
    TooManyColumns,
    #[error("too many rows")]
    TooManyRows,
    #[error("no rows read")]
    NoRowsRead,
    #[error("rows are not all the same width")]
    NotARectangle,
}

/// A rectangular array of glyphs, stored row-major.
///
/// Out-of-bounds reads return `.`; out-of-bounds writes are silently
/// dropped. Dimensions are fixed for the lifetime of the grid except
/// through [`Grid::resize_raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates a `height` by `width` grid filled with `fill`.
    pub fn new_fill(height: usize, width: usize, fill: u8) -> Self {
        assert!(height <= Y_MAX && width <= X_MAX);
        Self {
            width,
            height,
            cells: vec![fill; height * width],
        }
    }

    /// Creates an inert (all-`.`) grid.
    pub fn new(height: usize, width: usize) -> Self {
        Self::new_fill(height, width, INERT)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn in_bounds(&self, y: usize, x: usize) -> bool {
        y < self.height && x < self.width
    }

    /// Resizes the backing storage in place, without preserving
    /// contents at their old coordinates (matches the C original's
    /// `field_resize_raw`, used only by the loader while building up a
    /// grid row by row).
    pub fn resize_raw(&mut self, height: usize, width: usize) {
        assert!(height <= Y_MAX && width <= X_MAX);
        self.height = height;
        self.width = width;
        self.cells.resize(height * width, INERT);
    }

    pub fn peek(&self, y: usize, x: usize) -> u8 {
        if !self.in_bounds(y, x) {
            return INERT;
        }
        self.cells[y * self.width + x]
    }

    pub fn peek_relative(&self, y: usize, x: usize, dy: isize, dx: isize) -> u8 {
        match relative_coords(y, x, dy, dx, self.height, self.width) {
            Some((y0, x0)) => self.cells[y0 * self.width + x0],
            None => INERT,
        }
    }

    pub fn poke(&mut self, y: usize, x: usize, g: u8) {
        if !self.in_bounds(y, x) {
            return;
        }
        let idx = y * self.width + x;
        self.cells[idx] = g;
    }

    pub fn poke_relative(&mut self, y: usize, x: usize, dy: isize, dx: isize, g: u8) {
        if let Some((y0, x0)) = relative_coords(y, x, dy, dx, self.height, self.width) {
            self.cells[y0 * self.width + x0] = g;
        }
    }

    /// Fills the rectangle `[y, y+height) x [x, x+width)`, clipped to
    /// the grid's own bounds.
    pub fn fill_rect(&mut self, y: usize, x: usize, height: usize, width: usize, fill: u8) {
        if y >= self.height || x >= self.width {
            return;
        }
        let rows = height.min(self.height - y);
        let cols = width.min(self.width - x);
        for iy in 0..rows {
            let row = (y + iy) * self.width + x;
            self.cells[row..row + cols].fill(fill);
        }
    }

    /// Copies a subrectangle from `src` into `self`, handling
    /// overlapping source/destination (when `src` and `self` are the
    /// same grid) by choosing the row traversal direction that avoids
    /// clobbering unread source rows.
    pub fn copy_rect(
        &mut self,
        src: &Grid,
        src_y: usize,
        src_x: usize,
        dest_y: usize,
        dest_x: usize,
        height: usize,
        width: usize,
    ) {
        if src_y >= src.height || src_x >= src.width || dest_y >= self.height || dest_x >= self.width
        {
            return;
        }
        let rows = height
            .min(src.height - src_y)
            .min(self.height - dest_y);
        if rows == 0 {
            return;
        }
        let cols = width
            .min(src.width - src_x)
            .min(self.width - dest_x);
        if cols == 0 {
            return;
        }

        let row_indices: Box<dyn Iterator<Item = usize>> = if src_y >= dest_y {
            Box::new(0..rows)
        } else {
            Box::new((0..rows).rev())
        };
        for iy in row_indices {
            let src_row = (src_y + iy) * src.width + src_x;
            let dest_row = (dest_y + iy) * self.width + dest_x;
            let row = src.cells[src_row..src_row + cols].to_vec();
            self.cells[dest_row..dest_row + cols].copy_from_slice(&row);
        }
    }

    /// Renders the grid as one line per row, normalizing any glyph
    /// outside `'#'..='~'` to `!` for display (mirrors the C
    /// original's `field_fput`).
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for iy in 0..self.height {
            let row = &self.cells[iy * self.width..(iy + 1) * self.width];
            for &c in row {
                out.push(if is_valid_glyph(c) { c as char } else { '!' });
            }
            out.push('\n');
        }
        out
    }

    /// Parses the grid text format: one row per line, bytes outside
    /// the valid glyph range normalized to `.`, trailing whitespace
    /// trimmed, blank lines skipped, and all non-empty lines required
    /// to share one width.
    pub fn parse(text: &str) -> Result<Grid, GridLoadError> {
        let mut width = None;
        let mut rows: Vec<Vec<u8>> = Vec::new();

        for raw_line in text.lines() {
            if rows.len() >= Y_MAX {
                return Err(GridLoadError::TooManyRows);
            }
            let trimmed = raw_line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.len() >= X_MAX {
                return Err(GridLoadError::TooManyColumns);
            }
            match width {
                None => width = Some(trimmed.len()),
                Some(w) if w != trimmed.len() => return Err(GridLoadError::NotARectangle),
                Some(_) => {}
            }
            let row: Vec<u8> = trimmed
                .bytes()
                .map(|b| if is_valid_glyph(b) { b } else { INERT })
                .collect();
            rows.push(row);
        }

        let width = width.ok_or(GridLoadError::NoRowsRead)?;
        let height = rows.len();
        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            cells.extend(row);
        }
        debug!("parsed grid ({width}x{height})");
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Thin wrapper: reads `path` and parses it with [`Grid::parse`].
    pub fn load_file(path: impl AsRef<Path>) -> Result<Grid, GridLoadError> {
        let path = path.as_ref();
        debug!("loading grid from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Grid::parse(&text)
    }
}

fn relative_coords(
    y: usize,
    x: usize,
    dy: isize,
    dx: isize,
    height: usize,
    width: usize,
) -> Option<(usize, usize)> {
    let y0 = y as isize + dy;
    let x0 = x as isize + dx;
    if y0 < 0 || x0 < 0 || y0 as usize >= height || x0 as usize >= width {
        return None;
    }
    Some((y0 as usize, x0 as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_poke_round_trip() {
        let mut g = Grid::new(2, 3);
        g.poke(1, 2, b'A');
        assert_eq!(g.peek(1, 2), b'A');
        assert_eq!(g.peek(0, 0), INERT);
    }

    #[test]
    fn out_of_range_read_returns_inert() {
        let g = Grid::new(2, 2);
        assert_eq!(g.peek_relative(0, 0, -1, -1), INERT);
        assert_eq!(g.peek_relative(1, 1, 5, 5), INERT);
    }

    #[test]
    fn out_of_range_write_is_noop() {
        let mut g = Grid::new(2, 2);
        g.poke_relative(1, 1, 5, 5, b'X');
        assert_eq!(g.peek(1, 1), INERT);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut g = Grid::new(3, 3);
        g.fill_rect(1, 1, 10, 10, b'#');
        assert_eq!(g.peek(1, 1), b'#');
        assert_eq!(g.peek(2, 2), b'#');
        assert_eq!(g.peek(0, 0), INERT);
    }

    #[test]
    fn copy_rect_handles_self_overlap_shift_down() {
        let mut g = Grid::new(4, 1);
        g.poke(0, 0, b'1');
        g.poke(1, 0, b'2');
        g.poke(2, 0, b'3');
        let src = g.clone();
        g.copy_rect(&src, 0, 0, 1, 0, 3, 1);
        assert_eq!(g.peek(1, 0), b'1');
        assert_eq!(g.peek(2, 0), b'2');
        assert_eq!(g.peek(3, 0), b'3');
    }

    #[test]
    fn parse_rejects_non_rectangular_input() {
        let err = Grid::parse("ab\nabc\n").unwrap_err();
        assert!(matches!(err, GridLoadError::NotARectangle));
    }

    #[test]
    fn parse_skips_blank_lines_and_normalizes_invalid_bytes() {
        let g = Grid::parse("a.c\n\n.\u{0001}.\n").unwrap();
        assert_eq!(g.height(), 2);
        assert_eq!(g.peek(1, 1), INERT);
    }

    #[test]
    fn parse_empty_input_is_no_rows_read() {
        let err = Grid::parse("").unwrap_err();
        assert!(matches!(err, GridLoadError::NoRowsRead));
    }

    #[test]
    fn to_text_normalizes_invalid_glyphs_for_display() {
        let mut g = Grid::new(1, 1);
        g.poke(0, 0, 0x01);
        assert_eq!(g.to_text(), "!\n");
    }
}
