//! Terraria world save (`.wld`) decoder and map renderer.
//!
//! The format is little-endian, bit-packed and run-length compressed, laid
//! out as a pointer table of independent sections. This crate validates the
//! file preamble, decodes the header and tile sections, and flattens the
//! tile grid into a flat-color map image.

pub mod codec;
pub mod error;
pub mod render;
pub mod world;

#[cfg(test)]
mod fixtures;

pub use codec::{
    Block, BoundsMode, ByteCursor, GameMode, Liquid, LiquidKind, ProgressFn, Slope, Tile, Wall,
    WorldGrid, WorldHeader, WorldPreamble, MIN_SUPPORTED_VERSION,
};
pub use error::{Error, Result};
pub use render::{encode_image, rasterize};
pub use world::{decode_world, DecodeOptions, DecodeSections, DecodedWorld};
