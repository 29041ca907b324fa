//! Lossless JSON snapshot of a whole animation.

use std::fs;
use std::path::Path;

use crate::error::ParseError;
use crate::model::{AnimationDocument, DEFAULT_FRAME_DURATION_MS, Frame};
use crate::schema::{AnimationSnapshot, CubeDimensions, FrameRecord, SNAPSHOT_VERSION};

/// Convert a document into its serializable record.
pub fn to_record(document: &AnimationDocument) -> AnimationSnapshot {
    let dims = document.dimensions();
    AnimationSnapshot {
        version: SNAPSHOT_VERSION,
        cube_width: dims.width,
        cube_height: dims.height,
        cube_depth: dims.depth,
        default_duration: Some(document.default_duration_ms()),
        frame_collection: document
            .frames()
            .iter()
            .map(|frame| FrameRecord {
                width: frame.width(),
                height: frame.height(),
                depth: frame.depth(),
                cells: frame.cells().iter().map(|&lit| lit as u8).collect(),
                duration: frame.duration_ms(),
            })
            .collect(),
    }
}

/// Rebuild a document from a record, checking every structural invariant.
pub fn from_record(snapshot: AnimationSnapshot) -> Result<AnimationDocument, ParseError> {
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(ParseError::UnsupportedVersion(snapshot.version));
    }

    let dims = CubeDimensions {
        width: snapshot.cube_width,
        height: snapshot.cube_height,
        depth: snapshot.cube_depth,
    };
    dims.validate().map_err(ParseError::Dimensions)?;

    if snapshot.frame_collection.is_empty() {
        return Err(ParseError::NoFrames);
    }

    // `validate` has ruled out overflow.
    let expected_cells = dims.cell_count();
    let minimum = dims.min_duration_ms();

    let mut frames = Vec::with_capacity(snapshot.frame_collection.len());
    for (i, record) in snapshot.frame_collection.into_iter().enumerate() {
        let actual = (record.width, record.height, record.depth);
        if actual != (dims.width, dims.height, dims.depth) {
            return Err(ParseError::FrameDimensions {
                frame: i,
                expected: (dims.width, dims.height, dims.depth),
                actual,
            });
        }
        if record.cells.len() != expected_cells {
            return Err(ParseError::CellCount {
                frame: i,
                expected: expected_cells,
                actual: record.cells.len(),
            });
        }

        let cells = record
            .cells
            .iter()
            .enumerate()
            .map(|(index, &value)| match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(ParseError::CellValue {
                    frame: i,
                    index,
                    value,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut frame = Frame::from_parts(dims, cells, minimum);
        frame
            .set_duration(record.duration)
            .map_err(|source| ParseError::Duration { frame: i, source })?;
        frames.push(frame);
    }

    let default_duration = snapshot
        .default_duration
        .unwrap_or(DEFAULT_FRAME_DURATION_MS)
        .max(minimum);

    Ok(AnimationDocument::from_frames(dims, frames, default_duration))
}

/// Serialize a document to compact JSON.
pub fn to_snapshot(document: &AnimationDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string(&to_record(document))
}

/// Serialize a document to indented JSON.
pub fn to_snapshot_pretty(document: &AnimationDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_record(document))
}

/// Parse snapshot text back into a document.
///
/// Nothing is returned unless the whole snapshot checks out, so a caller can
/// keep its current document on failure.
pub fn parse_snapshot(text: &str) -> Result<AnimationDocument, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let snapshot: AnimationSnapshot = serde_json::from_str(text)?;
    let document = from_record(snapshot)?;
    log::debug!(
        "Loaded {}x{}x{} animation with {} frames",
        document.width(),
        document.height(),
        document.depth(),
        document.frame_count()
    );
    Ok(document)
}

/// Write a snapshot file.
pub fn save_snapshot<P: AsRef<Path>>(path: P, document: &AnimationDocument) -> crate::Result<()> {
    let text = to_snapshot_pretty(document).map_err(ParseError::from)?;
    fs::write(path.as_ref(), text)?;
    log::info!("Saved snapshot to {}", path.as_ref().display());
    Ok(())
}

/// Read a snapshot file.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> crate::Result<AnimationDocument> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(parse_snapshot(&text)?)
}
