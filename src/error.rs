//! Errors that end an `iconify` run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

//===========================================================================//

/// The image formats that source images may be stored in.
pub const SUPPORTED_FORMATS: &str = "JPEG, PNG, BMP, GIF, TARGA";

//===========================================================================//

/// Everything that can go wrong while building an ICO file.
#[derive(Debug, Error)]
pub enum Error {
    /// The command line was empty or lacks a required option.
    #[error("{0}")]
    Usage(String),
    /// A command-line token was malformed, unsupported, or repeated.
    #[error("{0}")]
    Argument(String),
    /// A source image path does not exist.
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),
    /// A source image is not in one of the [`SUPPORTED_FORMATS`].
    #[error("Unrecognized image format (supported formats: {})",
            SUPPORTED_FORMATS)]
    UnsupportedFormat,
    /// A source image is in a known format, but its contents are invalid.
    #[error("Corrupt image {}: {detail}", .path.display())]
    CorruptImage {
        /// The path of the image that failed to decode.
        path: PathBuf,
        /// The decoder's description of the problem.
        detail: String,
    },
    /// The output file could not be written.
    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },
    /// Reading a source image or encoding the icon failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A `Result` whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

//===========================================================================//


//===========================================================================//
