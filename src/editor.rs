//! Editor session: the document plus the selection, onion-skin toggle and
//! playback state a presentation layer needs.
//!
//! The data model stays selection-free; this type is the collaborator that
//! owns "which frame is current" and applies the editor's rules on top
//! (no edits while playing, selection follows inserts and deletes).

use crate::Result;
use crate::encode::{self, to_source_table};
use crate::error::{IndexError, InvariantViolation, ValidationError};
use crate::model::{AnimationDocument, Frame, OnionSkin, ScanOrder, onion_skin, parse_duration};
use crate::playback::{Playback, ScheduledTick, TickOutcome, TickToken};
use crate::schema::{CubeDimensions, EditorConfig};

/// Interactive editing state around one [`AnimationDocument`].
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: AnimationDocument,
    current: usize,
    onion_skin: bool,
    /// Configured blank-frame duration, reapplied to every new animation.
    default_duration_ms: Option<u32>,
    playback: Playback,
}

impl EditorSession {
    /// Start a session with a fresh one-frame document.
    pub fn new(config: &EditorConfig) -> std::result::Result<Self, ValidationError> {
        config.validate()?;
        let document =
            AnimationDocument::new(config.dimensions, config.effective_default_duration())?;
        Ok(Self {
            document,
            current: 0,
            onion_skin: config.onion_skin,
            default_duration_ms: config.default_duration_ms,
            playback: Playback::new(),
        })
    }

    /// Wrap an existing document, selecting its first frame.
    pub fn from_document(document: AnimationDocument) -> Self {
        Self {
            document,
            current: 0,
            onion_skin: true,
            default_duration_ms: None,
            playback: Playback::new(),
        }
    }

    pub fn document(&self) -> &AnimationDocument {
        &self.document
    }

    /// Index of the selected frame.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> &Frame {
        &self.document.frames()[self.current]
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn select(&mut self, index: usize) -> std::result::Result<(), IndexError> {
        self.document.frame(index)?;
        self.current = index;
        Ok(())
    }

    pub fn next_frame(&mut self) -> usize {
        self.current = self.document.next_index(self.current);
        self.current
    }

    pub fn prev_frame(&mut self) -> usize {
        self.current = self.document.prev_index(self.current);
        self.current
    }

    /// Insert after the selection and select the new frame.
    pub fn insert_frame(&mut self, copy_current: bool) -> Result<usize> {
        self.ensure_editing()?;
        self.current = self.document.insert_frame(self.current, copy_current)?;
        Ok(self.current)
    }

    /// Delete the selected frame, moving the selection to a valid neighbour.
    pub fn delete_frame(&mut self) -> Result<usize> {
        self.ensure_editing()?;
        self.current = self.document.delete_frame(self.current)?;
        Ok(self.current)
    }

    /// Flip one cell of the selected frame by flat index.
    pub fn toggle_cell(&mut self, index: usize) -> Result<bool> {
        self.ensure_editing()?;
        Ok(self.current_frame_mut().toggle_cell(index)?)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, z: usize, lit: bool) -> Result<()> {
        self.ensure_editing()?;
        Ok(self.current_frame_mut().set_cell(x, y, z, lit)?)
    }

    /// Fill or clear one depth slice of the selected frame.
    pub fn set_slice(&mut self, z: usize, lit: bool) -> Result<()> {
        self.ensure_editing()?;
        Ok(self.current_frame_mut().set_slice(z, lit)?)
    }

    /// Fill or clear the whole selected frame.
    pub fn fill(&mut self, lit: bool) -> Result<()> {
        self.ensure_editing()?;
        self.current_frame_mut().fill(lit);
        Ok(())
    }

    /// Apply a user-typed duration to the selected frame.
    pub fn edit_duration(&mut self, text: &str) -> Result<u32> {
        self.ensure_editing()?;
        let minimum = self.current_frame().min_duration();
        let duration = parse_duration(text, minimum).inspect_err(|e| {
            log::warn!("Rejected duration for frame {}: {}", self.current, e);
        })?;
        self.current_frame_mut().set_duration(duration)?;
        Ok(duration)
    }

    /// Minimum duration of the selected frame, for validation messages.
    pub fn min_duration(&self) -> u32 {
        self.current_frame().min_duration()
    }

    pub fn onion_skin_enabled(&self) -> bool {
        self.onion_skin
    }

    pub fn set_onion_skin(&mut self, enabled: bool) {
        self.onion_skin = enabled;
    }

    /// Neighbour frames to ghost in the preview. Empty while playing.
    pub fn onion_skin(&self) -> OnionSkin {
        if self.onion_skin && !self.is_playing() {
            onion_skin(&self.document, self.current)
        } else {
            OnionSkin::default()
        }
    }

    /// Switch between edit and playback, returning the first tick on start.
    pub fn toggle_playback(&mut self) -> Option<ScheduledTick> {
        self.playback.toggle(&self.document, self.current)
    }

    /// Fire a playback tick, moving the selection when it advances.
    pub fn tick(&mut self, token: TickToken) -> TickOutcome {
        let outcome = self.playback.tick(&self.document, self.current, token);
        if let TickOutcome::Advanced { frame, .. } = outcome {
            self.current = frame;
        }
        outcome
    }

    /// Replace the document with a blank one of the typed size.
    ///
    /// Blank frames get the session's configured default duration, or the
    /// built-in default raised to the new cube's minimum when none was set.
    /// On invalid input the current document is kept.
    pub fn new_animation(&mut self, width: &str, height: &str, depth: &str) -> Result<()> {
        let dimensions = CubeDimensions::parse(width, height, depth)?;
        let config = EditorConfig {
            dimensions,
            default_duration_ms: self.default_duration_ms,
            onion_skin: self.onion_skin,
        };
        config.validate()?;
        let document =
            AnimationDocument::new(dimensions, config.effective_default_duration())?;
        self.replace_document(document);
        Ok(())
    }

    /// Replace the document with a parsed snapshot.
    ///
    /// On failure the current document and selection are untouched.
    pub fn load_snapshot(&mut self, text: &str) -> Result<()> {
        let document = encode::parse_snapshot(text).inspect_err(|e| {
            log::warn!("Snapshot load failed: {e}");
        })?;
        self.replace_document(document);
        Ok(())
    }

    pub fn snapshot(&self) -> std::result::Result<String, serde_json::Error> {
        encode::to_snapshot(&self.document)
    }

    pub fn source_table(&self, order: ScanOrder) -> String {
        to_source_table(&self.document, order)
    }

    fn replace_document(&mut self, document: AnimationDocument) {
        self.playback.stop();
        self.document = document;
        self.current = self.current.min(self.document.frame_count() - 1);
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        let current = self.current;
        // `current` is kept in range by every mutation above.
        &mut self.document.frames_mut()[current]
    }

    fn ensure_editing(&self) -> std::result::Result<(), InvariantViolation> {
        if self.is_playing() {
            log::warn!("Edit rejected: playback is running");
            return Err(InvariantViolation::PlaybackActive);
        }
        Ok(())
    }
}
