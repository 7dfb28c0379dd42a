//! Converts truecolor images into tile graphics for a 4x16-color tiled display:
//! a palette table, a deduplicated pattern table with mirror reuse, and a name
//! table.

pub mod color;
pub mod common;
pub mod config;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod image;
pub mod manifest;
pub mod palette;
pub mod pattern;
pub mod persist;
pub mod preview;
pub mod serialize;

pub use color::{quantize_channel, quantize_color, HwColor};
pub use common::Color;
pub use encoder::{encode, NameTableEntry, TileAssets, TileEncoder};
pub use error::{ArtifactError, EncodeError};
pub use image::{Image, Raster};
pub use serialize::{deserialize, serialize, Artifacts};
