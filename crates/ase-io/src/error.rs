//! Error types for sprite decoding.
//!
//! One taxonomy for the whole decoder. Structural failures (truncated
//! stream, bad magic) abort the parse of a file; feature-level conditions
//! (tilesets, nested property maps, unknown cel or property types) are
//! reported to the caller's diagnostic sink and decoding continues on a
//! best-effort basis. Nothing is silently discarded.

use std::io;
use thiserror::Error;

/// Sprite decoding error.
#[derive(Debug, Error)]
pub enum AseError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stream ended mid-read. Fatal for the file being parsed.
    #[error("unexpected end of data while reading {0}")]
    Truncated(&'static str),

    /// A magic number did not match the format constant.
    #[error("bad magic number: expected 0x{expected:04X}, found 0x{found:04X}")]
    BadMagic {
        /// The constant the format requires.
        expected: u16,
        /// The value actually read.
        found: u16,
    },

    /// Feature the decoder recognizes but does not implement.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Cel-type value outside the known set (raw/linked/compressed).
    #[error("unsupported cel type: {0}")]
    UnsupportedCelType(u16),

    /// Property type tag outside the known set, or one whose payload
    /// cannot be reconstructed.
    #[error("unsupported property type: 0x{0:04X}")]
    UnsupportedProperty(u16),

    /// Decompressed cel data would overflow the declared buffer.
    #[error("corrupt compressed image: {0}")]
    CorruptImage(String),

    /// The inflate engine reported a hard failure.
    #[error("decompression failed: {0}")]
    Decompress(String),

    /// Data required by the operation is absent.
    #[error("missing data: {0}")]
    MissingData(String),

    /// No sprite with the requested name has been loaded.
    #[error("no sprite named {0:?}")]
    NotFound(String),

    /// Invalid image construction (bad depth, bad coordinates).
    #[error(transparent)]
    Core(#[from] ase_core::CoreError),
}

/// Result type for sprite decoding.
pub type AseResult<T> = Result<T, AseError>;
