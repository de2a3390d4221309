//! # Error Module
//!
//! This module provides custom error types for the `huskylens` crate.
//! It uses the `thiserror` crate for ergonomic error handling.

use thiserror::Error;

/// Result type alias for `huskylens` operations.
pub type Result<T> = std::result::Result<T, HuskyLensError>;

/// Main error type for the `huskylens` crate.
#[derive(Debug, Error)]
pub enum HuskyLensError {
    /// Failed to open the serial port.
    #[error("Failed to open serial port '{port_name}': {reason}")]
    PortOpen { port_name: String, reason: String },

    /// Failed to enumerate the serial ports on the system.
    #[error("Failed to enumerate serial ports: {0}")]
    PortEnumerate(String),

    /// Failed to read from the serial port.
    #[error("Failed to read from serial port: {0}")]
    PortRead(String),

    /// Failed to write to the serial port.
    #[error("Failed to write to serial port: {0}")]
    PortWrite(String),

    /// A command was issued after the connection was closed.
    #[error("Connection to the HuskyLens is closed")]
    ConnectionClosed,

    /// The response frame did not start with the expected header bytes.
    #[error("Invalid response header: {}", hex::encode(.0))]
    BadHeader([u8; 3]),

    /// The camera sent fewer bytes than the frame declared.
    #[error("Truncated response: expected {expected} bytes, got {actual}")]
    TruncatedResponse { expected: usize, actual: usize },

    /// The response checksum did not match the frame contents.
    #[error("Checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// The camera answered with a command code the request does not expect.
    #[error("Unexpected response command: {command:#04x}")]
    UnexpectedResponse { command: u8 },

    /// A name or display text longer than one frame can carry.
    #[error("Text of {len} bytes exceeds the protocol limit of {max}")]
    TextTooLong { len: usize, max: usize },

    /// A text position outside the 320x240 screen was requested.
    #[error("Invalid text position ({x}, {y}): outside the 320x240 screen")]
    InvalidTextPosition { x: u16, y: u16 },
}

impl HuskyLensError {
    /// Creates a new port open error.
    #[must_use]
    pub fn port_open(port_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PortOpen {
            port_name: port_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new port read error.
    #[must_use]
    pub fn port_read(msg: impl Into<String>) -> Self {
        Self::PortRead(msg.into())
    }

    /// Creates a new port write error.
    #[must_use]
    pub fn port_write(msg: impl Into<String>) -> Self {
        Self::PortWrite(msg.into())
    }

    /// Returns true if the error reports an incomplete frame.
    ///
    /// `knock` treats this case as "camera absent" rather than a failure.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedResponse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_open_error() {
        let error = HuskyLensError::port_open("/dev/ttyUSB0", "Permission denied");
        let msg = error.to_string();
        assert!(msg.contains("/dev/ttyUSB0"));
        assert!(msg.contains("Permission denied"));
    }

    #[test]
    fn test_checksum_mismatch_error() {
        let error = HuskyLensError::ChecksumMismatch {
            expected: 0x3A,
            actual: 0x00,
        };
        let msg = error.to_string();
        assert!(msg.contains("0x3a"));
        assert!(msg.contains("0x00"));
    }

    #[test]
    fn test_truncated_response_is_truncated() {
        let error = HuskyLensError::TruncatedResponse {
            expected: 6,
            actual: 2,
        };
        assert!(error.is_truncated());
        assert!(!HuskyLensError::ConnectionClosed.is_truncated());
    }

    #[test]
    fn test_bad_header_error() {
        let error = HuskyLensError::BadHeader([0x00, 0xAA, 0x11]);
        assert!(error.to_string().contains("00aa11"));
    }
}
