//! Firmware image table export.
//!
//! The table is a C array literal read row unit by row unit by the cube
//! player. Each frame contributes its row lines plus a duration entry; the
//! table ends with one zero per row unit (`height * depth` entries), which
//! the player reads as its end marker.

use crate::model::{AnimationDocument, ScanOrder};

/// Opening line of the generated table.
pub const TABLE_PREAMBLE: &str = "const imageTab[] PROGMEM = {\n";

/// Closing line of the generated table.
pub const TABLE_POSTAMBLE: &str = "};\n";

/// Generate the firmware table for every frame in playback order.
pub fn to_source_table(document: &AnimationDocument, order: ScanOrder) -> String {
    let row_units = document.dimensions().row_units();
    let mut out = String::from(TABLE_PREAMBLE);

    for frame in document.frames() {
        out.push_str(&frame.to_code(order));
    }

    out.push_str("  ");
    for _ in 0..row_units {
        out.push_str("0, ");
    }
    out.push_str("// end\n");
    out.push_str(TABLE_POSTAMBLE);

    log::debug!(
        "Generated {:?} table: {} frames, {} bytes",
        order,
        document.frame_count(),
        out.len()
    );
    out
}
