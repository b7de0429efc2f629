pub mod header;
pub mod preamble;
pub mod reader;
pub mod tiles;

pub use header::{GameMode, LanternNight, WorldHeader};
pub use preamble::{WorldPreamble, FILE_TYPE_WORLD, MAGIC, MIN_SUPPORTED_VERSION};
pub use reader::{BoundsMode, ByteCursor, ProgressFn};
pub use tiles::{Block, Liquid, LiquidKind, Slope, Tile, Wall, WorldGrid};
