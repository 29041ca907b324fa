//! Animation data model: frames, the document that orders them, and
//! onion-skin neighbour selection.

mod document;
mod frame;
mod onion;

pub use document::AnimationDocument;
pub use frame::{
    DEFAULT_FRAME_DURATION_MS, Frame, ScanOrder, TIME_PER_LED_MS, min_duration_for,
    parse_duration,
};
pub use onion::{OnionSkin, onion_skin};
