//! Cross-sheet assembly.
//!
//! Lays the six faces out on a 4x3 grid as an unfolded cube, a contact
//! sheet for quick inspection. Side faces sit on the middle row with the
//! caps above and below the right face.

use log::debug;

use crate::face::Face;
use crate::imagebuf::{CHANNELS, ImageBuf};

/// Cross sheet grid width in cells.
pub const CROSS_COLS: usize = 4;
/// Cross sheet grid height in cells.
pub const CROSS_ROWS: usize = 3;

/// Grid cell `(col, row)` of a face on the cross sheet.
pub fn cross_position(face: Face) -> (usize, usize) {
    match face {
        Face::Right => (1, 1),
        Face::Left => (3, 1),
        Face::Front => (2, 1),
        Face::Back => (0, 1),
        Face::Up => (1, 0),
        Face::Down => (1, 2),
    }
}

/// Errors while assembling the cross sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeError {
    /// Fewer or more than six faces supplied.
    MissingFaces(usize),
    /// A face is not square or does not match the first face's edge.
    SizeMismatch { expected: usize, found: usize },
}

impl std::fmt::Display for ComposeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComposeError::MissingFaces(count) => {
                write!(f, "Cross sheet needs 6 faces, got {}", count)
            }
            ComposeError::SizeMismatch { expected, found } => {
                write!(
                    f,
                    "Cross sheet face size mismatch: expected {0}x{0}, found {1}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for ComposeError {}

/// Assemble six faces, in [`Face::all`] order, into one cross sheet.
///
/// Every face must be square with the same edge length. Cells outside the
/// cross stay opaque black.
pub fn assemble_cross(faces: &[ImageBuf]) -> Result<ImageBuf, ComposeError> {
    if faces.len() != 6 {
        return Err(ComposeError::MissingFaces(faces.len()));
    }
    let edge = faces[0].width();
    for face in faces {
        if face.width() != edge {
            return Err(ComposeError::SizeMismatch {
                expected: edge,
                found: face.width(),
            });
        }
        if face.height() != edge {
            return Err(ComposeError::SizeMismatch {
                expected: edge,
                found: face.height(),
            });
        }
    }

    let sheet_width = CROSS_COLS * edge;
    let mut sheet = ImageBuf::new(sheet_width, CROSS_ROWS * edge);
    sheet.fill([0, 0, 0, 255]);
    debug!(
        "Assembling {}x{} cross sheet from {} px faces",
        sheet.width(),
        sheet.height(),
        edge
    );

    let data = sheet.data_mut();
    for (face, img) in Face::all().iter().zip(faces) {
        let (col, row) = cross_position(*face);
        for y in 0..edge {
            let dst = ((row * edge + y) * sheet_width + col * edge) * CHANNELS;
            let src = y * edge * CHANNELS;
            data[dst..dst + edge * CHANNELS].copy_from_slice(&img.data()[src..src + edge * CHANNELS]);
        }
    }
    Ok(sheet)
}
