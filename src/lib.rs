//! A library for building multi-resolution Windows ICO files.
//!
//! An ICO file produced by this crate holds one PNG-encoded image for each
//! of the sizes in [`ICON_SIZES`].  Each image is cut from a source picture
//! by letterboxing it onto a transparent square canvas and rescaling that
//! canvas to the icon size.
//!
//! # Example
//!
//! ```no_run
//! use iconify::{options, pipeline};
//!
//! let tokens = ["-256", "large.png", "small.png"];
//! let config = options::resolve(tokens.iter().copied()).unwrap();
//! let written = pipeline::run(&config).unwrap();
//! println!("Wrote {}", written.display());
//! ```
//!
//! The container encoder can also be used on its own:
//!
//! ```
//! use iconify::{IconDir, IconDirEntry};
//!
//! let image = image::RgbaImage::new(48, 48);
//! let mut icon_dir = IconDir::new();
//! icon_dir.add_entry(IconDirEntry::encode(&image).unwrap());
//! let bytes = icon_dir.to_bytes().unwrap();
//! assert_eq!(&bytes[..6], b"\x00\x00\x01\x00\x01\x00");
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod error;
mod icondir;
mod iconsize;
pub mod options;
mod payload;
pub mod pipeline;
pub mod source;

pub use crate::error::{Error, Result};
pub use crate::icondir::{
    read_records, IcoByteOrder, IconDir, IconDirEntry, IconDirRecord,
};
pub use crate::iconsize::{IconSize, ICON_SIZES};
pub use crate::payload::encode_png;

//===========================================================================//
