//! Onion-skin neighbour selection for the preview.

use super::AnimationDocument;

/// Frames to ghost behind the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OnionSkin {
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

/// Pick the neighbours of `current` worth drawing.
///
/// The previous frame is skipped when it is the current or the next frame,
/// and the next frame is skipped when it wraps back onto the current one, so
/// no frame is drawn twice.
pub fn onion_skin(document: &AnimationDocument, current: usize) -> OnionSkin {
    let prev = document.prev_index(current);
    let next = document.next_index(current);
    OnionSkin {
        previous: (prev != current && prev != next).then_some(prev),
        next: (next != current).then_some(next),
    }
}
