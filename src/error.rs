//! Error types for the animation data model.
//!
//! Each failure family gets its own enum so callers can tell a rejected user
//! value apart from a refused structural edit or an unreadable snapshot.

use std::io;

/// A user-supplied value failed a range or type check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Cube {axis} must be at least 1 cell, got {value:?}")]
    InvalidDimension { axis: Axis, value: String },
    #[error("Duration {value:?} is not a whole number of milliseconds")]
    DurationNotNumeric { value: String },
    #[error("Duration of {value}ms is too small, the minimum is {minimum}ms")]
    DurationTooShort { value: u32, minimum: u32 },
}

/// An edit would break a structural invariant of the document or session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("Cannot delete the only remaining frame")]
    LastFrame,
    #[error("Editing is disabled while playback is running")]
    PlaybackActive,
}

/// A position fell outside the cube or the frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("Cell ({x}, {y}, {z}) is outside a {width}x{height}x{depth} cube")]
    Cell {
        x: usize,
        y: usize,
        z: usize,
        width: usize,
        height: usize,
        depth: usize,
    },
    #[error("Flat cell index {index} out of range (cell count {len})")]
    FlatCell { index: usize, len: usize },
    #[error("Depth slice {z} out of range (depth {depth})")]
    Slice { z: usize, depth: usize },
    #[error("Frame {index} out of range (frame count {len})")]
    Frame { index: usize, len: usize },
}

/// Snapshot text could not be turned back into a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Snapshot is empty")]
    Empty,
    #[error("Malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),
    #[error("Invalid cube dimensions in snapshot: {0}")]
    Dimensions(ValidationError),
    #[error("Snapshot contains no frames")]
    NoFrames,
    #[error("Frame {frame} is {actual:?} but the cube is {expected:?}")]
    FrameDimensions {
        frame: usize,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
    #[error("Frame {frame} has {actual} cells, expected {expected}")]
    CellCount {
        frame: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Frame {frame} cell {index} has value {value}, expected 0 or 1")]
    CellValue { frame: usize, index: usize, value: u8 },
    #[error("Frame {frame}: {source}")]
    Duration {
        frame: usize,
        #[source]
        source: ValidationError,
    },
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Cube axis, used to name the offending dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
    Depth,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Axis::Width => "width",
            Axis::Height => "height",
            Axis::Depth => "depth",
        })
    }
}
