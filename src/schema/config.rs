//! Configuration types for new animations.

use serde::{Deserialize, Serialize};

use crate::error::{Axis, ValidationError};
use crate::model::{DEFAULT_FRAME_DURATION_MS, min_duration_for};

/// Default cube edge length used by a fresh editor.
pub const DEFAULT_CUBE_SIZE: usize = 3;

fn default_onion_skin() -> bool {
    true
}

/// Cube dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeDimensions {
    /// Cells per row (X dimension).
    pub width: usize,
    /// Rows per depth slice (Y dimension).
    pub height: usize,
    /// Number of depth slices (Z dimension).
    pub depth: usize,
}

impl Default for CubeDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_CUBE_SIZE,
            height: DEFAULT_CUBE_SIZE,
            depth: DEFAULT_CUBE_SIZE,
        }
    }
}

impl CubeDimensions {
    /// Create dimensions, rejecting any zero-length axis.
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self, ValidationError> {
        let dims = Self {
            width,
            height,
            depth,
        };
        dims.validate()?;
        Ok(dims)
    }

    /// Parse user-typed axis lengths.
    ///
    /// Each value must be a whole number of at least 1. Surrounding whitespace
    /// is ignored.
    pub fn parse(width: &str, height: &str, depth: &str) -> Result<Self, ValidationError> {
        let dims = Self {
            width: parse_axis(Axis::Width, width)?,
            height: parse_axis(Axis::Height, height)?,
            depth: parse_axis(Axis::Depth, depth)?,
        };
        dims.validate()?;
        Ok(dims)
    }

    /// Check every axis is at least one cell long and the total cell count
    /// fits in `usize`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (axis, value) in [
            (Axis::Width, self.width),
            (Axis::Height, self.height),
            (Axis::Depth, self.depth),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidDimension {
                    axis,
                    value: value.to_string(),
                });
            }
        }
        let slice = self
            .width
            .checked_mul(self.height)
            .ok_or(ValidationError::InvalidDimension {
                axis: Axis::Height,
                value: self.height.to_string(),
            })?;
        slice
            .checked_mul(self.depth)
            .ok_or(ValidationError::InvalidDimension {
                axis: Axis::Depth,
                value: self.depth.to_string(),
            })?;
        Ok(())
    }

    /// Total cell count (width * height * depth). Only meaningful once
    /// [`validate`](Self::validate) has passed.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Number of row units (height * depth) the firmware scans per frame.
    #[inline]
    pub fn row_units(&self) -> usize {
        self.height * self.depth
    }

    /// Minimum frame duration for a cube of this size.
    #[inline]
    pub fn min_duration_ms(&self) -> u32 {
        min_duration_for(self.height, self.depth)
    }
}

fn parse_axis(axis: Axis, text: &str) -> Result<usize, ValidationError> {
    match text.trim().parse::<usize>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(ValidationError::InvalidDimension {
            axis,
            value: text.trim().to_string(),
        }),
    }
}

/// Settings for starting a new animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Cube size.
    #[serde(default)]
    pub dimensions: CubeDimensions,
    /// Duration given to blank frames, in milliseconds.
    ///
    /// When set it must meet the cube's minimum. When omitted, blank frames
    /// get [`DEFAULT_FRAME_DURATION_MS`] or the cube's minimum, whichever is
    /// larger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_duration_ms: Option<u32>,
    /// Show neighbouring frames in the preview while editing.
    #[serde(default = "default_onion_skin")]
    pub onion_skin: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            dimensions: CubeDimensions::default(),
            default_duration_ms: None,
            onion_skin: true,
        }
    }
}

impl EditorConfig {
    /// Validate dimensions and the default duration against the cube's minimum.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.dimensions.validate()?;
        let minimum = self.dimensions.min_duration_ms();
        match self.default_duration_ms {
            Some(value) if value < minimum => {
                Err(ValidationError::DurationTooShort { value, minimum })
            }
            _ => Ok(()),
        }
    }

    /// Duration for blank frames of this cube.
    ///
    /// A configured value is returned as is; call [`validate`](Self::validate)
    /// first. Only the built-in fallback is raised to the cube's minimum.
    pub fn effective_default_duration(&self) -> u32 {
        self.default_duration_ms
            .unwrap_or_else(|| DEFAULT_FRAME_DURATION_MS.max(self.dimensions.min_duration_ms()))
    }
}
