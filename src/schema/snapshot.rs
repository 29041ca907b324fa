//! Serializable snapshot records.
//!
//! These are plain data: the snapshot never carries behavior, so loading one
//! is a conversion into [`crate::model::AnimationDocument`] rather than a
//! revival of live objects.

use serde::{Deserialize, Serialize};

/// Snapshot format version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Whole-animation snapshot.
///
/// Field names follow the JSON layout the editor has always saved, so files
/// written before the `version` field existed still load. Unknown fields
/// (canvas geometry in older saves) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub cube_width: usize,
    pub cube_height: usize,
    pub cube_depth: usize,
    /// Duration for new blank frames, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_duration: Option<u32>,
    /// Frames in playback order.
    pub frame_collection: Vec<FrameRecord>,
}

/// One frame as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    /// Flat slice-major cells, 0 = unlit, 1 = lit.
    pub cells: Vec<u8>,
    /// Display duration in milliseconds.
    pub duration: u32,
}
