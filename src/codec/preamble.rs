use crate::codec::reader::ByteCursor;
use crate::error::{Error, Result};

/// Identity token at byte 4 of every modern save file.
pub const MAGIC: &[u8; 7] = b"relogic";

/// File-type tag for world saves (other tags are player/map files).
pub const FILE_TYPE_WORLD: u8 = 2;

/// Oldest structural version we decode (Terraria 1.3.5.3).
pub const MIN_SUPPORTED_VERSION: i32 = 194;

/// Pointer-table index of the world header section.
pub const SECTION_HEADER: usize = 1;

/// Pointer-table index of the tile data section.
pub const SECTION_TILES: usize = 2;

/// Everything the preamble pass establishes before semantic parsing:
/// structural version, section offsets, the important-tile bit set, and the
/// grid dimensions. Computed once per file, immutable afterward.
#[derive(Debug, Clone)]
pub struct WorldPreamble {
    pub version: i32,
    /// Byte offsets of the file's sections. Index 0 is always 0, meaning
    /// "no section"; real sections start at index 1.
    pub pointers: Vec<u32>,
    /// Indexed by block-type id; true when the block stores sub-tile frame
    /// coordinates in the tile section.
    pub important: Vec<bool>,
    pub width: i32,
    pub height: i32,
}

impl WorldPreamble {
    /// Byte offset of section `index`, or `None` when the file has no such
    /// section (missing table entry or the reserved 0 pointer).
    pub fn section_offset(&self, index: usize) -> Option<usize> {
        match self.pointers.get(index) {
            Some(0) | None => None,
            Some(&off) => Some(off as usize),
        }
    }

    pub fn is_important(&self, block_id: u16) -> bool {
        self.important.get(block_id as usize).copied().unwrap_or(false)
    }
}

/// Validate the file identity and read the preamble.
///
/// Leaves the cursor back at offset 0. Any cursor fault during this pass
/// (truncated files included) surfaces as `Error::Format`, never as a raw
/// bounds error.
pub fn validate(cursor: &mut ByteCursor) -> Result<WorldPreamble> {
    let result = read_preamble(cursor).map_err(|e| match e {
        Error::Format(_) | Error::UnsupportedVersion { .. } => e,
        other => Error::Format(other.to_string()),
    });
    cursor.seek(0);
    result
}

fn read_preamble(cursor: &mut ByteCursor) -> Result<WorldPreamble> {
    let version = cursor.read_i32()?;

    let magic = cursor.read_bytes(MAGIC.len())?;
    if magic != MAGIC {
        return Err(Error::Format("missing 'relogic' signature".into()));
    }
    let tag = cursor.read_u8()?;
    if tag != FILE_TYPE_WORLD {
        return Err(Error::Format(format!("file type tag {tag} is not a world save")));
    }
    if version < MIN_SUPPORTED_VERSION {
        return Err(Error::UnsupportedVersion { found: version, minimum: MIN_SUPPORTED_VERSION });
    }

    // Revision counter and favorite flag, not needed for decoding.
    cursor.skip(12)?;

    let pointer_count = cursor.read_u16()? as usize;
    let mut pointers = Vec::with_capacity(pointer_count + 1);
    pointers.push(0);
    for _ in 0..pointer_count {
        pointers.push(cursor.read_u32()?);
    }

    let flag_bits = cursor.read_u16()? as usize;
    let important = cursor.read_bit_flags(flag_bits)?;

    // The header section starts here: world name and seed, then 44 bytes of
    // worldgen version, GUID, world id and bounds. We only want the grid
    // dimensions at this stage; the header pass re-reads its section.
    cursor.read_string()?;
    cursor.read_string()?;
    cursor.skip(44)?;
    let height = cursor.read_i32()?;
    let width = cursor.read_i32()?;

    Ok(WorldPreamble { version, pointers, important, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::WorldBuilder;

    #[test]
    fn test_preamble_roundtrip() {
        let data = WorldBuilder::new(279, 40, 30).build();
        let mut cursor = ByteCursor::new(&data);
        let preamble = validate(&mut cursor).unwrap();

        assert_eq!(preamble.version, 279);
        assert_eq!(preamble.width, 40);
        assert_eq!(preamble.height, 30);
        assert!(preamble.section_offset(SECTION_HEADER).is_some());
        assert!(preamble.section_offset(SECTION_TILES).is_some());
        // Index 0 is the reserved "no section" slot.
        assert_eq!(preamble.section_offset(0), None);
        // Validation must not move the cursor.
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut data = WorldBuilder::new(279, 8, 8).build();
        data[4] = b'x';
        let err = validate(&mut ByteCursor::new(&data)).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_rejects_wrong_file_type() {
        let mut data = WorldBuilder::new(279, 8, 8).build();
        data[11] = 1; // player save tag
        let err = validate(&mut ByteCursor::new(&data)).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_rejects_old_version() {
        let mut data = WorldBuilder::new(279, 8, 8).build();
        data[0..4].copy_from_slice(&100i32.to_le_bytes());
        let err = validate(&mut ByteCursor::new(&data)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { found: 100, minimum: 194 }));
    }

    #[test]
    fn test_truncated_preamble_is_format_error() {
        let data = WorldBuilder::new(279, 8, 8).build();
        for cut in [2, 11, 20, 40] {
            let err = validate(&mut ByteCursor::new(&data[..cut])).unwrap_err();
            assert!(matches!(err, Error::Format(_)), "cut at {cut}: {err}");
        }
    }

    #[test]
    fn test_important_flags_indexed_by_block_id() {
        let mut important = vec![false; 12];
        important[3] = true;
        important[9] = true;
        let data = WorldBuilder::new(279, 8, 8).important(important).build();
        let preamble = validate(&mut ByteCursor::new(&data)).unwrap();
        assert!(preamble.is_important(3));
        assert!(preamble.is_important(9));
        assert!(!preamble.is_important(4));
        // Ids past the flag set are never important.
        assert!(!preamble.is_important(5000));
    }
}
