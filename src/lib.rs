//! LED cube animator - frame model and firmware export for voxel animations.
//!
//! This crate holds the editing core of an LED cube animation tool: a 3D
//! grid of lit/unlit cells per frame, slice-major coordinate mapping, the
//! minimum frame duration the cube driver can display, and two export forms
//! (a lossless JSON snapshot and a C image table for the firmware).
//!
//! # Architecture
//!
//! - `schema`: Configuration and snapshot record types
//! - `model`: Frames, the animation document, onion-skin selection
//! - `encode`: Snapshot and source-table export
//! - `playback`: Edit/playback mode and tick pacing
//! - `editor`: Session state a presentation layer drives
//!
//! # Example
//!
//! ```rust,no_run
//! use led_cube_animator::{
//!     encode::{parse_snapshot, to_snapshot, to_source_table},
//!     model::{AnimationDocument, ScanOrder},
//!     schema::CubeDimensions,
//! };
//!
//! let dims = CubeDimensions::new(3, 3, 3)?;
//! let mut doc = AnimationDocument::new(dims, 100)?;
//! doc.frame_mut(0)?.set_cell(1, 1, 1, true)?;
//! let next = doc.insert_frame(0, true)?;
//! doc.frame_mut(next)?.set_slice(0, true)?;
//!
//! let table = to_source_table(&doc, ScanOrder::DepthFirst);
//! println!("{table}");
//!
//! let saved = to_snapshot(&doc)?;
//! assert_eq!(parse_snapshot(&saved)?, doc);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod editor;
pub mod encode;
pub mod error;
pub mod model;
pub mod playback;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use editor::EditorSession;
pub use error::{Error, Result};
pub use model::{AnimationDocument, Frame, ScanOrder};
pub use schema::{CubeDimensions, EditorConfig};
