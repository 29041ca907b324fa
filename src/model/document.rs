//! The animation document: cube dimensions plus an ordered frame sequence.

use crate::error::{IndexError, InvariantViolation, ValidationError};
use crate::schema::CubeDimensions;

use super::Frame;

/// Top-level animation aggregate.
///
/// Dimensions are fixed at construction; resizing means building a new
/// document. The frame sequence is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDocument {
    dimensions: CubeDimensions,
    frames: Vec<Frame>,
    default_duration_ms: u32,
}

impl AnimationDocument {
    /// Create a document holding one blank frame.
    ///
    /// `default_duration_ms` is used for this and every later blank frame and
    /// must satisfy the cube's minimum duration.
    pub fn new(
        dimensions: CubeDimensions,
        default_duration_ms: u32,
    ) -> Result<Self, ValidationError> {
        let first = Frame::new(dimensions, default_duration_ms)?;
        log::debug!(
            "New {}x{}x{} animation, default duration {}ms",
            dimensions.width,
            dimensions.height,
            dimensions.depth,
            default_duration_ms
        );
        Ok(Self {
            dimensions,
            frames: vec![first],
            default_duration_ms,
        })
    }

    /// Assemble a document from frames that already match `dimensions`.
    pub(crate) fn from_frames(
        dimensions: CubeDimensions,
        frames: Vec<Frame>,
        default_duration_ms: u32,
    ) -> Self {
        debug_assert!(!frames.is_empty());
        debug_assert!(frames.iter().all(|f| f.dimensions() == dimensions));
        Self {
            dimensions,
            frames,
            default_duration_ms,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> CubeDimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.dimensions.depth
    }

    /// Duration given to blank frames.
    pub fn default_duration_ms(&self) -> u32 {
        self.default_duration_ms
    }

    /// Frames in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(crate) fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Result<&Frame, IndexError> {
        let len = self.frames.len();
        self.frames.get(index).ok_or(IndexError::Frame { index, len })
    }

    pub fn frame_mut(&mut self, index: usize) -> Result<&mut Frame, IndexError> {
        let len = self.frames.len();
        self.frames
            .get_mut(index)
            .ok_or(IndexError::Frame { index, len })
    }

    /// Insert a frame right after `at`, returning the new frame's index.
    ///
    /// With `copy_current` the new frame duplicates frame `at` (cells and
    /// duration) by value; otherwise it is blank with the default duration.
    pub fn insert_frame(&mut self, at: usize, copy_current: bool) -> Result<usize, IndexError> {
        let source = self.frame(at)?;
        let frame = if copy_current {
            source.clone()
        } else {
            Frame::from_parts(
                self.dimensions,
                vec![false; self.dimensions.cell_count()],
                self.default_duration_ms,
            )
        };

        let new_index = at + 1;
        self.frames.insert(new_index, frame);
        log::debug!(
            "Inserted {} frame at {} ({} frames)",
            if copy_current { "copied" } else { "blank" },
            new_index,
            self.frames.len()
        );
        Ok(new_index)
    }

    /// Remove frame `at`, returning the index the selection should move to.
    ///
    /// The last remaining frame cannot be deleted.
    pub fn delete_frame(&mut self, at: usize) -> crate::Result<usize> {
        self.frame(at)?;
        if self.frames.len() == 1 {
            log::warn!("Refusing to delete the only frame");
            return Err(InvariantViolation::LastFrame.into());
        }
        self.frames.remove(at);
        log::debug!("Deleted frame {} ({} frames left)", at, self.frames.len());
        Ok(at.min(self.frames.len() - 1))
    }

    /// Index after `current`, wrapping to 0.
    pub fn next_index(&self, current: usize) -> usize {
        let next = current.saturating_add(1);
        if next >= self.frames.len() { 0 } else { next }
    }

    /// Index before `current`, wrapping to the last frame.
    pub fn prev_index(&self, current: usize) -> usize {
        if current == 0 || current > self.frames.len() {
            self.frames.len() - 1
        } else {
            current - 1
        }
    }

    /// Minimum duration shared by every frame of this cube.
    pub fn min_duration(&self) -> u32 {
        self.dimensions.min_duration_ms()
    }

    /// Total playback time of one loop, in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.duration_ms() as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn doc(width: usize, height: usize, depth: usize) -> AnimationDocument {
        AnimationDocument::new(CubeDimensions::new(width, height, depth).unwrap(), 100).unwrap()
    }

    #[test]
    fn test_new_document_has_one_blank_frame() {
        let d = doc(3, 3, 3);
        assert_eq!(d.frame_count(), 1);
        assert_eq!(d.frames()[0].lit_count(), 0);
        assert_eq!(d.frames()[0].duration_ms(), 100);
    }

    #[test]
    fn test_new_rejects_short_default() {
        let dims = CubeDimensions::new(8, 8, 8).unwrap();
        assert!(matches!(
            AnimationDocument::new(dims, 100),
            Err(ValidationError::DurationTooShort { value: 100, .. })
        ));
    }

    #[test]
    fn test_delete_last_frame_is_noop() {
        let mut d = doc(3, 3, 3);
        d.frame_mut(0).unwrap().fill(true);
        let before = d.clone();

        let err = d.delete_frame(0).unwrap_err();
        assert!(matches!(
            err,
            Error::Invariant(InvariantViolation::LastFrame)
        ));
        assert_eq!(d, before);
        assert_eq!(d.frame_count(), 1);
    }

    #[test]
    fn test_delete_returns_clamped_selection() {
        let mut d = doc(2, 2, 2);
        d.insert_frame(0, false).unwrap();
        d.insert_frame(1, false).unwrap();
        assert_eq!(d.frame_count(), 3);

        assert_eq!(d.delete_frame(2).unwrap(), 1);
        assert_eq!(d.delete_frame(0).unwrap(), 0);
        assert_eq!(d.frame_count(), 1);
        assert!(matches!(
            d.delete_frame(5),
            Err(Error::Index(IndexError::Frame { index: 5, len: 1 }))
        ));
    }

    #[test]
    fn test_insert_positions() {
        let mut d = doc(2, 2, 2);
        d.frame_mut(0).unwrap().set_duration(200).unwrap();

        // At the end: appends.
        assert_eq!(d.insert_frame(0, false).unwrap(), 1);
        d.frame_mut(1).unwrap().set_duration(300).unwrap();

        // In the middle: lands right after.
        assert_eq!(d.insert_frame(0, false).unwrap(), 1);
        let durations: Vec<_> = d.frames().iter().map(|f| f.duration_ms()).collect();
        assert_eq!(durations, vec![200, 100, 300]);

        assert!(d.insert_frame(3, false).is_err());
    }

    #[test]
    fn test_insert_copy_is_by_value() {
        let mut d = doc(3, 3, 3);
        {
            let f = d.frame_mut(0).unwrap();
            f.set_cell(1, 1, 1, true).unwrap();
            f.set_duration(250).unwrap();
        }

        let copy = d.insert_frame(0, true).unwrap();
        assert_eq!(d.frames()[copy].cells(), d.frames()[0].cells());
        assert_eq!(d.frames()[copy].duration_ms(), 250);

        d.frame_mut(copy).unwrap().set_cell(0, 0, 0, true).unwrap();
        assert!(!d.frames()[0].cell(0, 0, 0).unwrap());

        d.frame_mut(0).unwrap().set_cell(2, 2, 2, true).unwrap();
        assert!(!d.frames()[copy].cell(2, 2, 2).unwrap());
    }

    #[test]
    fn test_circular_navigation() {
        let mut d = doc(2, 2, 2);
        assert_eq!(d.next_index(0), 0);
        assert_eq!(d.prev_index(0), 0);

        d.insert_frame(0, false).unwrap();
        d.insert_frame(1, false).unwrap();
        assert_eq!(d.next_index(0), 1);
        assert_eq!(d.next_index(2), 0);
        assert_eq!(d.prev_index(0), 2);
        assert_eq!(d.prev_index(2), 1);

        assert_eq!(d.next_index(usize::MAX), 0);
        assert_eq!(d.prev_index(usize::MAX), 2);
    }

    #[test]
    fn test_total_duration() {
        let mut d = doc(2, 2, 2);
        d.insert_frame(0, true).unwrap();
        d.frame_mut(1).unwrap().set_duration(150).unwrap();
        assert_eq!(d.total_duration_ms(), 250);
        assert_eq!(d.min_duration(), d.frames()[0].min_duration());
    }
}
