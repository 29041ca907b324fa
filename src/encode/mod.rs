//! Export formats for cube animations.
//!
//! # Snapshot
//!
//! Lossless JSON used for saving and reloading work:
//!
//! ```text
//! {
//!   "version": 1,
//!   "cubeWidth": 3, "cubeHeight": 3, "cubeDepth": 3,
//!   "defaultDuration": 100,
//!   "frameCollection": [
//!     { "width": 3, "height": 3, "depth": 3,
//!       "cells": [0, 1, ...],      // width*height*depth, slice-major
//!       "duration": 100 }
//!   ]
//! }
//! ```
//!
//! # Source table
//!
//! C array for the cube firmware:
//!
//! ```text
//! const imageTab[] PROGMEM = {
//!   0, 1, 0, // z0 y0          one line per (depth, row) unit
//!   ...
//!   100, // duration ms        one per frame
//!   0, 0, ..., // end          height*depth zeros
//! };
//! ```

mod snapshot;
mod source_table;

pub use snapshot::{
    from_record, load_snapshot, parse_snapshot, save_snapshot, to_record, to_snapshot,
    to_snapshot_pretty,
};
pub use source_table::{TABLE_POSTAMBLE, TABLE_PREAMBLE, to_source_table};
