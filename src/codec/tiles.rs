use serde::Serialize;
use tracing::{debug, warn};

use crate::codec::preamble::{WorldPreamble, SECTION_TILES};
use crate::codec::reader::ByteCursor;
use crate::error::{Error, Result};

/// Block id whose frame-Y is forced to 0 no matter what the stream says
/// (logic sensors; a quirk of the game's serializer).
const FRAME_Y_LOCKED_BLOCK: u16 = 144;

/// Upper bound on decoded grid size, with generous headroom over the
/// largest world the game generates (8400 x 2400).
const MAX_GRID_TILES: usize = 1 << 25;

/// Most tiles one record can cover: itself plus a maximal 16-bit run.
const MAX_RUN_TILES: usize = i16::MAX as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidKind {
    Water,
    Lava,
    Honey,
    Shimmer,
}

/// Slope shape carved into a block. Raw field values 1-5; 0 means no slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slope {
    Half,
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl Slope {
    fn from_bits(bits: u8) -> Option<Slope> {
        match bits {
            1 => Some(Slope::Half),
            2 => Some(Slope::TopRight),
            3 => Some(Slope::TopLeft),
            4 => Some(Slope::BottomRight),
            5 => Some(Slope::BottomLeft),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub id: u16,
    /// Sub-tile texture coordinates, present only for "important" ids.
    pub frame: Option<(i16, i16)>,
    pub paint: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wall {
    pub id: u16,
    pub paint: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Liquid {
    pub kind: LiquidKind,
    pub amount: u8,
}

/// One grid cell. Every field is optional or defaults to false; a cell with
/// no block, no wall and no liquid is background and gets colored purely
/// from its depth band.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Tile {
    pub block: Option<Block>,
    pub wall: Option<Wall>,
    pub liquid: Option<Liquid>,
    pub wire_red: bool,
    pub wire_blue: bool,
    pub wire_green: bool,
    pub wire_yellow: bool,
    pub slope: Option<Slope>,
    pub actuator: bool,
    pub actuated: bool,
    pub invisible_block: bool,
    pub invisible_wall: bool,
    pub fullbright_block: bool,
    pub fullbright_wall: bool,
}

impl Tile {
    pub fn is_background(&self) -> bool {
        self.block.is_none() && self.wall.is_none() && self.liquid.is_none()
    }
}

/// The decoded tile grid, column-major (the stream order: x outer, y inner).
#[derive(Debug, Clone)]
pub struct WorldGrid {
    width: usize,
    height: usize,
    records: usize,
    tiles: Vec<Tile>,
}

impl WorldGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of physical records the stream supplied; always
    /// `width * height` minus the tiles filled in by run-length copies.
    pub fn physical_records(&self) -> usize {
        self.records
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[x * self.height + y]
    }
}

/// One physical record from the stream: the tile plus how many extra copies
/// of it fill the column below. Returned as a pair so the grid-fill loop owns
/// all run-length state.
struct TileRecord {
    tile: Tile,
    run: u16,
}

/// Decode the tile section into a full `width x height` grid.
///
/// The stream holds fewer physical records than logical tiles: each record
/// carries a trailing run count repeating it downward in its column.
pub fn decode_tiles(cursor: &mut ByteCursor, preamble: &WorldPreamble) -> Result<WorldGrid> {
    let offset = preamble
        .section_offset(SECTION_TILES)
        .ok_or_else(|| Error::TileDecode("file has no tile section".into()))?;
    cursor.seek(offset);
    read_grid(cursor, preamble).map_err(|e| match e {
        Error::TileDecode(_) => e,
        other => Error::TileDecode(other.to_string()),
    })
}

fn read_grid(cursor: &mut ByteCursor, preamble: &WorldPreamble) -> Result<WorldGrid> {
    if preamble.width <= 0 || preamble.height <= 0 {
        return Err(Error::TileDecode(format!(
            "implausible grid dimensions {}x{}",
            preamble.width, preamble.height
        )));
    }
    let width = preamble.width as usize;
    let height = preamble.height as usize;

    // Stream-supplied dimensions size the allocation, so a crafted file
    // must not get to claim an arbitrarily large grid.
    let total = width
        .checked_mul(height)
        .filter(|&t| t <= MAX_GRID_TILES)
        .ok_or_else(|| {
            Error::TileDecode(format!("implausible grid dimensions {width}x{height}"))
        })?;

    // A record is at least one byte and covers at most MAX_RUN_TILES tiles
    // of one column; a section below that floor is truncated.
    let min_records = width * height.div_ceil(MAX_RUN_TILES);
    if cursor.remaining() < min_records {
        return Err(Error::TileDecode(format!(
            "{} bytes left cannot encode a {width}x{height} grid",
            cursor.remaining()
        )));
    }

    let mut tiles = Vec::with_capacity(total);
    let mut records = 0usize;
    for x in 0..width {
        let mut y = 0;
        while y < height {
            let TileRecord { tile, run } = read_tile_record(cursor, preamble)?;
            records += 1;
            let run = run as usize;
            tiles.push(tile.clone());
            y += 1;
            for _ in 0..run {
                if y >= height {
                    return Err(Error::TileDecode(format!(
                        "run of {run} at column {x} overflows the grid"
                    )));
                }
                tiles.push(tile.clone());
                y += 1;
            }
        }
    }

    debug!(width, height, records, "tile section decoded");
    Ok(WorldGrid { width, height, records, tiles })
}

/// Decode one physical tile record: the 1-4 byte flag chain, the payload
/// fields it gates, and the trailing run-length count.
fn read_tile_record(c: &mut ByteCursor, preamble: &WorldPreamble) -> Result<TileRecord> {
    let mut tile = Tile::default();

    // Bit 0 of each flag byte gates the next; the chain is 1 to 4 bytes.
    let flags1 = c.read_u8()?;
    let flags2 = if flags1 & 0x01 != 0 { c.read_u8()? } else { 0 };
    let flags3 = if flags2 & 0x01 != 0 { c.read_u8()? } else { 0 };
    let flags4 = if flags3 & 0x01 != 0 { c.read_u8()? } else { 0 };

    if flags1 > 1 {
        if flags1 & 0x02 != 0 {
            let id = if flags1 & 0x20 != 0 {
                c.read_u16()?
            } else {
                u16::from(c.read_u8()?)
            };
            let frame = if preamble.is_important(id) {
                let frame_x = c.read_i16()?;
                let frame_y = c.read_i16()?;
                Some((frame_x, if id == FRAME_Y_LOCKED_BLOCK { 0 } else { frame_y }))
            } else {
                None
            };
            let paint = if flags3 & 0x08 != 0 { Some(c.read_u8()?) } else { None };
            tile.block = Some(Block { id, frame, paint });
        }

        if flags1 & 0x04 != 0 {
            let id = u16::from(c.read_u8()?);
            let paint = if flags3 & 0x10 != 0 { Some(c.read_u8()?) } else { None };
            tile.wall = Some(Wall { id, paint });
        }

        let liquid_bits = flags1 >> 3 & 0x03;
        if liquid_bits != 0 {
            let amount = c.read_u8()?;
            // Flag byte 3 bit 7 overrides the 2-bit selector outright.
            let kind = if flags3 & 0x80 != 0 {
                LiquidKind::Shimmer
            } else {
                match liquid_bits {
                    1 => LiquidKind::Water,
                    2 => LiquidKind::Lava,
                    _ => LiquidKind::Honey,
                }
            };
            tile.liquid = Some(Liquid { kind, amount });
        }
    }

    if flags2 > 1 {
        tile.wire_red = flags2 & 0x02 != 0;
        tile.wire_blue = flags2 & 0x04 != 0;
        tile.wire_green = flags2 & 0x08 != 0;
        tile.slope = Slope::from_bits(flags2 >> 4 & 0x07);
    }

    if flags3 > 1 {
        tile.actuator = flags3 & 0x02 != 0;
        tile.actuated = flags3 & 0x04 != 0;
        tile.wire_yellow = flags3 & 0x20 != 0;
        if flags3 & 0x40 != 0 {
            // High byte of a 16-bit wall id; the stream byte is consumed
            // even for the (never produced) walless combination.
            let high = c.read_u8()?;
            match tile.wall.as_mut() {
                Some(wall) => wall.id |= u16::from(high) << 8,
                None => warn!(high, "wall high byte on a record with no wall"),
            }
        }
    }

    if flags4 > 1 {
        tile.invisible_block = flags4 & 0x02 != 0;
        tile.invisible_wall = flags4 & 0x04 != 0;
        tile.fullbright_block = flags4 & 0x08 != 0;
        tile.fullbright_wall = flags4 & 0x10 != 0;
    }

    let run = match flags1 >> 6 & 0x03 {
        0 => 0,
        1 => u16::from(c.read_u8()?),
        // Width selector 2 and the unused value 3 both read a signed
        // 16-bit count; negative counts clamp to no run.
        _ => c.read_i16()?.max(0) as u16,
    };

    Ok(TileRecord { tile, run })
}
