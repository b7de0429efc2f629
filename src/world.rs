use tracing::debug;

use crate::codec::header::{decode_header, WorldHeader};
use crate::codec::preamble::{validate, WorldPreamble};
use crate::codec::reader::{BoundsMode, ByteCursor, ProgressFn};
use crate::codec::tiles::{decode_tiles, WorldGrid};
use crate::error::Result;

/// Which pointer-addressed sections to decode. Both by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSections {
    pub header: bool,
    pub tiles: bool,
}

impl Default for DecodeSections {
    fn default() -> Self {
        Self { header: true, tiles: true }
    }
}

#[derive(Default)]
pub struct DecodeOptions<'a> {
    pub sections: DecodeSections,
    /// Advisory progress callback, fed whole percentages 0..=100 as the
    /// cursor moves through the buffer. Must not block.
    pub progress: Option<ProgressFn<'a>>,
    /// Strict by default. Lenient mode substitutes zeros for reads past the
    /// end of the buffer and exists only as a diagnostic fallback.
    pub bounds: BoundsMode,
}

/// Result of a decode run; sections that were not requested stay `None`.
#[derive(Debug)]
pub struct DecodedWorld {
    pub preamble: WorldPreamble,
    pub header: Option<WorldHeader>,
    pub grid: Option<WorldGrid>,
}

/// Decode a world file from an in-memory buffer.
///
/// Validates the preamble first, then runs the requested section passes.
/// Each pass seeks to its own pointer, so header and tiles decode
/// independently of one another. The whole pipeline is synchronous and
/// single-pass; a failure anywhere abandons the file.
pub fn decode_world(data: &[u8], options: DecodeOptions<'_>) -> Result<DecodedWorld> {
    let mut cursor = ByteCursor::with_mode(data, options.bounds);
    if let Some(progress) = options.progress {
        cursor = cursor.with_progress(progress);
    }

    let preamble = validate(&mut cursor)?;
    debug!(
        version = preamble.version,
        width = preamble.width,
        height = preamble.height,
        sections = preamble.pointers.len() - 1,
        "preamble validated"
    );

    let header = if options.sections.header {
        Some(decode_header(&mut cursor, &preamble)?)
    } else {
        None
    };
    let grid = if options.sections.tiles {
        Some(decode_tiles(&mut cursor, &preamble)?)
    } else {
        None
    };

    Ok(DecodedWorld { preamble, header, grid })
}
