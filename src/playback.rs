//! Playback pacing.
//!
//! The controller never sleeps or spawns timers itself. Entering playback
//! hands the caller a [`ScheduledTick`]; the caller fires it after `delay`
//! by calling [`Playback::tick`], which advances the selection and returns
//! the next tick. Durations are read when a tick fires, so an edit made
//! mid-playback takes effect on the following frame.

use std::time::Duration;

use crate::model::AnimationDocument;

/// Editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Edit,
    Playback,
}

/// Identifies the playback run a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

impl TickToken {
    /// Playback run number, for callers that hand the token across an FFI
    /// boundary as a plain number.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuild a token from [`generation`](Self::generation).
    pub fn from_generation(generation: u64) -> Self {
        Self { generation }
    }
}

/// A continuation the caller should fire after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub token: TickToken,
    pub delay: Duration,
}

/// Result of firing a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Selection moved to `frame`; fire `next` to keep going.
    Advanced { frame: usize, next: ScheduledTick },
    /// Playback stopped or a newer run replaced this one. Nothing changed.
    Stale,
}

/// Edit/playback mode switch with tick scheduling.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    mode: Mode,
    generation: u64,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.mode == Mode::Playback
    }

    /// Begin playback from `current`, returning the first tick.
    ///
    /// Returns `None` if already playing.
    pub fn start(&mut self, document: &AnimationDocument, current: usize) -> Option<ScheduledTick> {
        if self.is_playing() {
            return None;
        }
        self.mode = Mode::Playback;
        self.generation += 1;
        log::debug!("Playback started at frame {current}");
        Some(self.schedule(document, current))
    }

    /// Return to edit mode. Outstanding ticks become stale.
    pub fn stop(&mut self) {
        if self.is_playing() {
            log::debug!("Playback stopped");
        }
        self.mode = Mode::Edit;
    }

    /// Switch modes, returning the first tick when playback begins.
    pub fn toggle(
        &mut self,
        document: &AnimationDocument,
        current: usize,
    ) -> Option<ScheduledTick> {
        if self.is_playing() {
            self.stop();
            None
        } else {
            self.start(document, current)
        }
    }

    /// Fire a scheduled tick: advance circularly from `current`.
    pub fn tick(
        &self,
        document: &AnimationDocument,
        current: usize,
        token: TickToken,
    ) -> TickOutcome {
        if !self.is_playing() || token.generation != self.generation {
            return TickOutcome::Stale;
        }
        let frame = document.next_index(current);
        TickOutcome::Advanced {
            frame,
            next: self.schedule(document, frame),
        }
    }

    fn schedule(&self, document: &AnimationDocument, frame: usize) -> ScheduledTick {
        let duration_ms = document
            .frame(frame)
            .map(|f| f.duration_ms())
            .unwrap_or_else(|_| document.default_duration_ms());
        ScheduledTick {
            token: TickToken {
                generation: self.generation,
            },
            delay: Duration::from_millis(duration_ms as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CubeDimensions;

    fn three_frames() -> AnimationDocument {
        let mut doc = AnimationDocument::new(CubeDimensions::default(), 100).unwrap();
        doc.insert_frame(0, false).unwrap();
        doc.insert_frame(1, false).unwrap();
        doc.frame_mut(1).unwrap().set_duration(200).unwrap();
        doc.frame_mut(2).unwrap().set_duration(300).unwrap();
        doc
    }

    fn advanced(outcome: TickOutcome) -> (usize, ScheduledTick) {
        match outcome {
            TickOutcome::Advanced { frame, next } => (frame, next),
            TickOutcome::Stale => panic!("expected tick to advance"),
        }
    }

    #[test]
    fn test_first_tick_uses_current_duration() {
        let doc = three_frames();
        let mut playback = Playback::new();
        let tick = playback.start(&doc, 1).unwrap();
        assert_eq!(tick.delay, Duration::from_millis(200));
        assert!(playback.start(&doc, 1).is_none());
    }

    #[test]
    fn test_ticks_wrap_around() {
        let doc = three_frames();
        let mut playback = Playback::new();
        let tick = playback.toggle(&doc, 1).unwrap();

        let (frame, tick) = advanced(playback.tick(&doc, 1, tick.token));
        assert_eq!(frame, 2);
        assert_eq!(tick.delay, Duration::from_millis(300));

        let (frame, tick) = advanced(playback.tick(&doc, 2, tick.token));
        assert_eq!(frame, 0);
        assert_eq!(tick.delay, Duration::from_millis(100));
    }

    #[test]
    fn test_duration_read_at_fire_time() {
        let mut doc = three_frames();
        let mut playback = Playback::new();
        let tick = playback.start(&doc, 0).unwrap();

        doc.frame_mut(1).unwrap().set_duration(750).unwrap();
        let (_, next) = advanced(playback.tick(&doc, 0, tick.token));
        assert_eq!(next.delay, Duration::from_millis(750));
    }

    #[test]
    fn test_tick_after_stop_is_noop() {
        let doc = three_frames();
        let mut playback = Playback::new();
        let tick = playback.start(&doc, 0).unwrap();
        assert!(playback.toggle(&doc, 0).is_none());
        assert_eq!(playback.mode(), Mode::Edit);
        assert_eq!(playback.tick(&doc, 0, tick.token), TickOutcome::Stale);
    }

    #[test]
    fn test_restart_invalidates_old_chain() {
        let doc = three_frames();
        let mut playback = Playback::new();
        let old = playback.start(&doc, 0).unwrap();
        playback.stop();
        let new = playback.start(&doc, 0).unwrap();

        assert_eq!(playback.tick(&doc, 0, old.token), TickOutcome::Stale);
        assert!(matches!(
            playback.tick(&doc, 0, new.token),
            TickOutcome::Advanced { frame: 1, .. }
        ));
    }

    #[test]
    fn test_token_survives_generation_roundtrip() {
        let doc = three_frames();
        let mut playback = Playback::new();
        let old = playback.start(&doc, 0).unwrap();
        playback.stop();
        let new = playback.start(&doc, 0).unwrap();

        let stale = TickToken::from_generation(old.token.generation());
        assert_eq!(playback.tick(&doc, 0, stale), TickOutcome::Stale);
        let live = TickToken::from_generation(new.token.generation());
        assert_eq!(live, new.token);
        assert!(matches!(
            playback.tick(&doc, 0, live),
            TickOutcome::Advanced { frame: 1, .. }
        ));
    }
}
