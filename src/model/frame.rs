//! A single animation frame: one lit/unlit snapshot of the cube.

use std::fmt::Write as _;

use crate::error::{IndexError, ValidationError};
use crate::schema::CubeDimensions;

/// Time the cube driver needs to shift out one LED row unit, in milliseconds.
pub const TIME_PER_LED_MS: u32 = 5;

/// Duration given to new frames when the caller has no better value.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

/// Minimum frame duration for a cube with the given row count and depth.
///
/// The firmware scans every (depth, row) unit once per refresh whatever is
/// lit, so the floor depends on geometry only.
pub fn min_duration_for(height: usize, depth: usize) -> u32 {
    let total = (TIME_PER_LED_MS as u64)
        .saturating_mul(height as u64)
        .saturating_mul(depth as u64);
    total.min(u32::MAX as u64) as u32
}

/// Parse a user-typed duration and check it against `minimum`.
pub fn parse_duration(text: &str, minimum: u32) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    let value: u32 = trimmed
        .parse()
        .map_err(|_| ValidationError::DurationNotNumeric {
            value: trimmed.to_string(),
        })?;
    if value < minimum {
        return Err(ValidationError::DurationTooShort { value, minimum });
    }
    Ok(value)
}

/// Row-unit enumeration order used by [`Frame::to_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Depth slice outer, row inner (depth-height-width).
    #[default]
    DepthFirst,
    /// Row outer, depth slice inner (height-depth-width).
    HeightFirst,
}

impl ScanOrder {
    pub fn from_depth_before_height(depth_before_height: bool) -> Self {
        if depth_before_height {
            ScanOrder::DepthFirst
        } else {
            ScanOrder::HeightFirst
        }
    }
}

/// One frame of the animation.
///
/// Cells are stored slice-major: `[z * height * width + y * width + x]`.
/// The cell buffer always holds exactly `width * height * depth` entries and
/// the duration never drops below [`Frame::min_duration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<bool>,
    duration_ms: u32,
}

impl Frame {
    /// Create an all-unlit frame.
    pub fn new(dims: CubeDimensions, duration_ms: u32) -> Result<Self, ValidationError> {
        dims.validate()?;
        let minimum = dims.min_duration_ms();
        if duration_ms < minimum {
            return Err(ValidationError::DurationTooShort {
                value: duration_ms,
                minimum,
            });
        }
        Ok(Self {
            width: dims.width,
            height: dims.height,
            depth: dims.depth,
            cells: vec![false; dims.cell_count()],
            duration_ms,
        })
    }

    /// Build a frame from already-checked parts.
    pub(crate) fn from_parts(dims: CubeDimensions, cells: Vec<bool>, duration_ms: u32) -> Self {
        debug_assert_eq!(cells.len(), dims.cell_count());
        Self {
            width: dims.width,
            height: dims.height,
            depth: dims.depth,
            cells,
            duration_ms,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn dimensions(&self) -> CubeDimensions {
        CubeDimensions {
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }

    /// Flat cells in slice-major order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Convert (x, y, z) coordinates to a flat index.
    pub fn index(&self, x: usize, y: usize, z: usize) -> Result<usize, IndexError> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return Err(IndexError::Cell {
                x,
                y,
                z,
                width: self.width,
                height: self.height,
                depth: self.depth,
            });
        }
        Ok(z * self.height * self.width + y * self.width + x)
    }

    /// Convert a flat index back to (x, y, z).
    pub fn coords(&self, index: usize) -> Result<(usize, usize, usize), IndexError> {
        if index >= self.cells.len() {
            return Err(IndexError::FlatCell {
                index,
                len: self.cells.len(),
            });
        }
        let slice = self.width * self.height;
        Ok((index % self.width, (index % slice) / self.width, index / slice))
    }

    pub fn cell(&self, x: usize, y: usize, z: usize) -> Result<bool, IndexError> {
        Ok(self.cells[self.index(x, y, z)?])
    }

    pub fn set_cell(&mut self, x: usize, y: usize, z: usize, lit: bool) -> Result<(), IndexError> {
        let idx = self.index(x, y, z)?;
        self.cells[idx] = lit;
        Ok(())
    }

    /// Flip the cell at a flat index, returning its new state.
    pub fn toggle_cell(&mut self, index: usize) -> Result<bool, IndexError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(IndexError::FlatCell { index, len })?;
        *cell = !*cell;
        Ok(*cell)
    }

    /// Set every cell of depth slice `z`.
    pub fn set_slice(&mut self, z: usize, lit: bool) -> Result<(), IndexError> {
        if z >= self.depth {
            return Err(IndexError::Slice {
                z,
                depth: self.depth,
            });
        }
        let slice = self.width * self.height;
        self.cells[z * slice..(z + 1) * slice].fill(lit);
        Ok(())
    }

    /// Set every cell in the frame.
    pub fn fill(&mut self, lit: bool) {
        self.cells.fill(lit);
    }

    /// Number of lit cells.
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&lit| lit).count()
    }

    /// Per-LED transmission cost used by the duration floor.
    #[inline]
    pub fn time_per_led(&self) -> u32 {
        TIME_PER_LED_MS
    }

    /// Shortest duration the firmware can display this frame for.
    #[inline]
    pub fn min_duration(&self) -> u32 {
        min_duration_for(self.height, self.depth)
    }

    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Assign a new duration. Values below the minimum are rejected, not clamped.
    pub fn set_duration(&mut self, duration_ms: u32) -> Result<(), ValidationError> {
        let minimum = self.min_duration();
        if duration_ms < minimum {
            return Err(ValidationError::DurationTooShort {
                value: duration_ms,
                minimum,
            });
        }
        self.duration_ms = duration_ms;
        Ok(())
    }

    /// Cells in preview draw order: deepest slice first, then rows, then columns.
    pub fn cells_back_to_front(&self) -> impl Iterator<Item = (usize, usize, usize, bool)> + '_ {
        let (width, height) = (self.width, self.height);
        let cells = &self.cells;
        (0..self.depth).rev().flat_map(move |z| {
            (0..height).flat_map(move |y| {
                (0..width).map(move |x| (x, y, z, cells[z * height * width + y * width + x]))
            })
        })
    }

    /// Emit this frame's rows for the firmware image table.
    ///
    /// One line per (depth, row) unit holding `width` values, each tagged with
    /// a `// zN yM` marker, followed by a duration line.
    pub fn to_code(&self, order: ScanOrder) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.height * self.depth * 12);
        let mut emit_row = |z: usize, y: usize| {
            let start = z * self.height * self.width + y * self.width;
            out.push_str("  ");
            for &lit in &self.cells[start..start + self.width] {
                out.push_str(if lit { "1, " } else { "0, " });
            }
            // Infallible for String.
            let _ = writeln!(out, "// z{z} y{y}");
        };

        match order {
            ScanOrder::DepthFirst => {
                for z in 0..self.depth {
                    for y in 0..self.height {
                        emit_row(z, y);
                    }
                }
            }
            ScanOrder::HeightFirst => {
                for y in 0..self.height {
                    for z in 0..self.depth {
                        emit_row(z, y);
                    }
                }
            }
        }

        let _ = writeln!(out, "  {}, // duration ms", self.duration_ms);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dims(width: usize, height: usize, depth: usize) -> CubeDimensions {
        CubeDimensions::new(width, height, depth).unwrap()
    }

    fn frame(width: usize, height: usize, depth: usize) -> Frame {
        Frame::new(dims(width, height, depth), 1000).unwrap()
    }

    #[test]
    fn test_new_frame_is_unlit() {
        let f = frame(3, 3, 3);
        assert_eq!(f.cells().len(), 27);
        assert_eq!(f.lit_count(), 0);
        assert_eq!(f.duration_ms(), 1000);
    }

    #[test]
    fn test_index_is_slice_major() {
        let f = frame(2, 3, 4);
        assert_eq!(f.index(0, 0, 0).unwrap(), 0);
        assert_eq!(f.index(1, 0, 0).unwrap(), 1);
        assert_eq!(f.index(0, 1, 0).unwrap(), 2);
        assert_eq!(f.index(0, 0, 1).unwrap(), 6);
        assert_eq!(f.index(1, 2, 3).unwrap(), 23);
    }

    #[test]
    fn test_index_out_of_range() {
        let f = frame(2, 3, 4);
        assert!(matches!(f.index(2, 0, 0), Err(IndexError::Cell { x: 2, .. })));
        assert!(f.index(0, 3, 0).is_err());
        assert!(f.index(0, 0, 4).is_err());
        assert!(f.coords(24).is_err());
    }

    #[test]
    fn test_min_duration_3x3x3() {
        let f = frame(3, 3, 3);
        assert_eq!(f.min_duration(), 9 * f.time_per_led());
    }

    #[test]
    fn test_min_duration_saturates_on_huge_geometry() {
        assert_eq!(min_duration_for(usize::MAX, usize::MAX), u32::MAX);
        assert_eq!(min_duration_for(8, 8), 64 * TIME_PER_LED_MS);
    }

    #[test]
    fn test_new_rejects_short_duration() {
        let err = Frame::new(dims(3, 3, 3), 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DurationTooShort {
                value: 1,
                minimum: 9 * TIME_PER_LED_MS,
            }
        );
    }

    #[test]
    fn test_set_duration_floor() {
        let mut f = frame(3, 3, 3);
        let minimum = f.min_duration();

        assert!(f.set_duration(minimum - 1).is_err());
        assert_eq!(f.duration_ms(), 1000);

        f.set_duration(minimum).unwrap();
        assert_eq!(f.duration_ms(), minimum);
        f.set_duration(minimum + 250).unwrap();
        assert_eq!(f.duration_ms(), minimum + 250);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(" 120 ", 45), Ok(120));
        assert_eq!(
            parse_duration("abc", 45),
            Err(ValidationError::DurationNotNumeric {
                value: "abc".into()
            })
        );
        assert_eq!(
            parse_duration("-5", 45),
            Err(ValidationError::DurationNotNumeric { value: "-5".into() })
        );
        assert_eq!(
            parse_duration("44", 45),
            Err(ValidationError::DurationTooShort {
                value: 44,
                minimum: 45
            })
        );
    }

    #[test]
    fn test_set_slice_and_fill() {
        let mut f = frame(2, 2, 3);
        f.set_slice(1, true).unwrap();
        assert_eq!(f.lit_count(), 4);
        assert!(f.cell(0, 0, 1).unwrap());
        assert!(f.cell(1, 1, 1).unwrap());
        assert!(!f.cell(0, 0, 0).unwrap());
        assert!(!f.cell(0, 0, 2).unwrap());
        assert!(matches!(f.set_slice(3, true), Err(IndexError::Slice { z: 3, depth: 3 })));

        f.fill(true);
        assert_eq!(f.lit_count(), 12);
        f.fill(false);
        assert_eq!(f.lit_count(), 0);
    }

    #[test]
    fn test_toggle_cell() {
        let mut f = frame(2, 2, 2);
        assert!(f.toggle_cell(5).unwrap());
        assert_eq!(f.coords(5).unwrap(), (1, 0, 1));
        assert!(f.cell(1, 0, 1).unwrap());
        assert!(!f.toggle_cell(5).unwrap());
        assert!(f.toggle_cell(8).is_err());
    }

    #[test]
    fn test_back_to_front_order() {
        let mut f = frame(2, 1, 2);
        f.set_cell(1, 0, 1, true).unwrap();
        let order: Vec<_> = f.cells_back_to_front().collect();
        assert_eq!(
            order,
            vec![
                (0, 0, 1, false),
                (1, 0, 1, true),
                (0, 0, 0, false),
                (1, 0, 0, false),
            ]
        );
    }

    #[test]
    fn test_to_code_depth_first() {
        let mut f = frame(2, 2, 2);
        f.set_cell(1, 0, 0, true).unwrap();
        f.set_cell(0, 1, 1, true).unwrap();
        let code = f.to_code(ScanOrder::DepthFirst);
        let expected = "  0, 1, // z0 y0\n\
                        \x20 0, 0, // z0 y1\n\
                        \x20 0, 0, // z1 y0\n\
                        \x20 1, 0, // z1 y1\n\
                        \x20 1000, // duration ms\n";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_to_code_height_first() {
        let mut f = frame(2, 2, 2);
        f.set_cell(1, 0, 0, true).unwrap();
        f.set_cell(0, 1, 1, true).unwrap();
        let code = f.to_code(ScanOrder::HeightFirst);
        let markers: Vec<_> = code
            .lines()
            .filter_map(|l| l.split("// ").nth(1))
            .collect();
        assert_eq!(markers, vec!["z0 y0", "z1 y0", "z0 y1", "z1 y1", "duration ms"]);
    }

    #[test]
    fn test_scan_orders_differ_on_non_cubic() {
        let mut f = frame(2, 3, 4);
        f.set_cell(0, 2, 1, true).unwrap();
        f.set_cell(1, 0, 3, true).unwrap();
        let depth_first = f.to_code(ScanOrder::from_depth_before_height(true));
        let height_first = f.to_code(ScanOrder::from_depth_before_height(false));
        assert_ne!(depth_first, height_first);
        assert_eq!(depth_first.lines().count(), height_first.lines().count());
    }

    proptest! {
        #[test]
        fn prop_index_is_bijection(w in 1usize..7, h in 1usize..7, d in 1usize..7) {
            let f = frame(w, h, d);
            let mut seen = vec![false; w * h * d];
            for z in 0..d {
                for y in 0..h {
                    for x in 0..w {
                        let idx = f.index(x, y, z).unwrap();
                        prop_assert!(idx < w * h * d);
                        prop_assert!(!seen[idx]);
                        seen[idx] = true;
                        prop_assert_eq!(f.coords(idx).unwrap(), (x, y, z));
                    }
                }
            }
            prop_assert!(seen.iter().all(|&s| s));
        }

        #[test]
        fn prop_min_duration_ignores_content(
            w in 1usize..6,
            h in 1usize..6,
            d in 1usize..6,
            lit in proptest::collection::vec(any::<bool>(), 0..216),
        ) {
            let mut f = frame(w, h, d);
            let before = f.min_duration();
            for (i, &on) in lit.iter().take(w * h * d).enumerate() {
                if on {
                    f.toggle_cell(i).unwrap();
                }
            }
            prop_assert_eq!(f.min_duration(), before);
            prop_assert_eq!(before, TIME_PER_LED_MS * (h * d) as u32);
        }
    }
}
