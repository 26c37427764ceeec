//! Error types for core image construction.

use thiserror::Error;

/// Core image construction error.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Color depth with no known pixel interpretation.
    #[error("unsupported color depth: {0} bits per pixel")]
    UnsupportedDepth(u16),

    /// Accessor sample width does not match the buffer's pixel type.
    #[error("pixel type {0:?} does not store samples of the requested width")]
    InvalidPixelType(crate::PixelType),

    /// Coordinates outside the image bounds.
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    OutOfBounds {
        /// X coordinate that was requested.
        x: u32,
        /// Y coordinate that was requested.
        y: u32,
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
