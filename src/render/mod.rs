pub mod colors;

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::codec::header::WorldHeader;
use crate::codec::tiles::{Tile, WorldGrid};
use crate::error::{Error, Result};
use self::colors::{
    block_color, liquid_color, wall_color, Rgb, BACKGROUND_CAVERN, BACKGROUND_HELL,
    BACKGROUND_SKY, BACKGROUND_UNDERGROUND, FALLBACK_PALETTE, MAX_STATIC_BLOCK_ID,
    UNKNOWN_BLOCK, UNKNOWN_WALL,
};

/// Rows between the bottom of the world and the start of the hell band.
const HELL_BAND_ROWS: usize = 200;

/// Depth thresholds for bare background cells, precomputed from the header's
/// fractional levels by flooring to whole rows.
#[derive(Debug, Clone, Copy)]
struct DepthBands {
    surface: i64,
    rock: i64,
    hell: i64,
}

impl DepthBands {
    fn new(header: &WorldHeader, height: usize) -> Self {
        Self {
            surface: header.surface_level.floor() as i64,
            rock: header.rock_level.floor() as i64,
            hell: height as i64 - HELL_BAND_ROWS as i64,
        }
    }

    fn background(&self, y: usize) -> Rgb {
        let y = y as i64;
        if y < self.surface {
            BACKGROUND_SKY
        } else if y < self.rock {
            BACKGROUND_UNDERGROUND
        } else if y < self.hell {
            BACKGROUND_CAVERN
        } else {
            BACKGROUND_HELL
        }
    }
}

/// Flatten the grid into a fully opaque row-major RGBA image.
pub fn rasterize(header: &WorldHeader, grid: &WorldGrid) -> Result<RgbaImage> {
    let width = grid.width();
    let height = grid.height();
    if header.max_tiles_x != width as i32 || header.max_tiles_y != height as i32 {
        return Err(Error::Render(format!(
            "header says {}x{} but grid is {width}x{height}",
            header.max_tiles_x, header.max_tiles_y
        )));
    }

    let bands = DepthBands::new(header, height);
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let [r, g, b] = cell_color(grid.tile(x, y), y, bands);
            pixels.extend_from_slice(&[r, g, b, 0xFF]);
        }
    }

    debug!(width, height, "world rasterized");
    RgbaImage::from_raw(width as u32, height as u32, pixels)
        .ok_or_else(|| Error::Render("pixel buffer size mismatch".into()))
}

/// Single-cell color. Exactly one rule fires, in strict precedence order:
/// block, then liquid, then wall, then depth-band background.
fn cell_color(tile: &Tile, y: usize, bands: DepthBands) -> Rgb {
    if let Some(block) = &tile.block {
        return if block.id > MAX_STATIC_BLOCK_ID {
            FALLBACK_PALETTE[block.id as usize % FALLBACK_PALETTE.len()]
        } else {
            block_color(block.id).unwrap_or(UNKNOWN_BLOCK)
        };
    }
    if let Some(liquid) = &tile.liquid {
        return liquid_color(liquid.kind);
    }
    if let Some(wall) = &tile.wall {
        if wall.id > 0 {
            return wall_color(wall.id).unwrap_or(UNKNOWN_WALL);
        }
    }
    bands.background(y)
}

/// Encode a rasterized map with the image crate. PNG unless the caller asks
/// otherwise.
pub fn encode_image(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut out = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut out, format)
        .map_err(|e| Error::Render(format!("image encode failed: {e}")))?;
    Ok(out.into_inner())
}
