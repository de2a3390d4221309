//! # Frame Module
//!
//! Encoding and decoding of HuskyLens protocol frames.
//!
//! A frame is laid out as:
//!
//! ```text
//! 0x55 0xAA 0x11 <len> <command> <payload: len bytes> <checksum>
//! ```
//!
//! The checksum is the sum of all preceding bytes truncated to eight bits.
//! The same layout is used in both directions, so the encoder here doubles
//! as a response builder in tests.

use std::io::{ErrorKind, Read};

use log::debug;

use crate::error::{HuskyLensError, Result};
use crate::protocol::command::Command;

/// Frame header: two magic bytes followed by the protocol address.
pub const HEADER: [u8; 3] = [0x55, 0xAA, 0x11];

/// Bytes read before the payload length is known: header, length, command.
const PREFIX_LEN: usize = 5;

/// Payload length is carried in a single byte.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// One protocol frame: a command code and its payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Creates a frame for the given command.
    ///
    /// # Panics
    ///
    /// Panics if the payload exceeds 255 bytes; no documented command
    /// comes anywhere near that limit.
    #[must_use]
    pub fn new(command: Command, payload: impl Into<Vec<u8>>) -> Self {
        let payload = payload.into();
        assert!(
            payload.len() <= MAX_PAYLOAD,
            "payload exceeds protocol limit"
        );
        Frame {
            command: command.code(),
            payload,
        }
    }

    /// Returns true if this frame is an OK acknowledgement.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.command == Command::ReturnOk.code()
    }

    /// Returns true if this frame is a result-count info frame.
    #[must_use]
    pub fn is_info(&self) -> bool {
        self.command == Command::ReturnInfo.code()
    }

    /// Encodes the frame into its wire representation.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PREFIX_LEN + self.payload.len() + 1);
        bytes.extend_from_slice(&HEADER);
        bytes.push(self.payload.len() as u8);
        bytes.push(self.command);
        bytes.extend_from_slice(&self.payload);
        bytes.push(checksum(&bytes));
        bytes
    }

    /// Reads and validates one frame from the reader.
    ///
    /// Short reads (timeout or end of stream) fail with
    /// [`HuskyLensError::TruncatedResponse`]; a corrupted header or
    /// checksum fails with the matching protocol error. A failed decode
    /// consumes only the bytes it read, so the connection stays usable.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Frame> {
        let mut prefix = [0u8; PREFIX_LEN];
        read_full(reader, &mut prefix)?;

        if prefix[..3] != HEADER {
            return Err(HuskyLensError::BadHeader([prefix[0], prefix[1], prefix[2]]));
        }
        let len = prefix[3] as usize;
        let command = prefix[4];

        // Payload plus the trailing checksum byte.
        let mut rest = vec![0u8; len + 1];
        read_full(reader, &mut rest)?;

        debug!(
            "read: {} {}",
            hex::encode(prefix),
            hex::encode(&rest)
        );

        let mut sum = checksum(&prefix);
        sum = rest[..len]
            .iter()
            .fold(sum, |acc, byte| acc.wrapping_add(*byte));
        let received = rest[len];
        if sum != received {
            return Err(HuskyLensError::ChecksumMismatch {
                expected: sum,
                actual: received,
            });
        }

        rest.truncate(len);
        Ok(Frame {
            command,
            payload: rest,
        })
    }
}

/// Sums bytes into the eight-bit protocol checksum.
fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, byte| acc.wrapping_add(*byte))
}

/// Fills `buf` from the reader, treating a timeout or end of stream as a
/// truncated response.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => {
                break
            }
            Err(e) => return Err(HuskyLensError::port_read(e.to_string())),
        }
    }
    if filled < buf.len() {
        return Err(HuskyLensError::TruncatedResponse {
            expected: buf.len(),
            actual: filled,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_encode_knock() {
        let bytes = Frame::new(Command::RequestKnock, vec![]).encode();
        assert_eq!(bytes, vec![0x55, 0xAA, 0x11, 0x00, 0x2C, 0x3C]);
    }

    #[test]
    fn test_encode_algorithm_payload() {
        let bytes = Frame::new(Command::RequestAlgorithm, vec![0x03, 0x00]).encode();
        assert_eq!(bytes[3], 0x02);
        assert_eq!(bytes[4], 0x2D);
        assert_eq!(bytes[5..7], [0x03, 0x00]);
        let sum: u8 = bytes[..bytes.len() - 1]
            .iter()
            .fold(0u8, |acc, b| acc.wrapping_add(*b));
        assert_eq!(*bytes.last().unwrap(), sum);
    }

    #[test]
    fn test_read_round_trip() {
        let frame = Frame::new(Command::ReturnInfo, vec![0x02, 0x00, 0x01, 0x00]);
        let mut cursor = Cursor::new(frame.encode());
        let decoded = Frame::read_from(&mut cursor).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_read_bad_header() {
        let mut bytes = Frame::new(Command::ReturnOk, vec![]).encode();
        bytes[0] = 0x00;
        let err = Frame::read_from(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, HuskyLensError::BadHeader(_)));
    }

    #[test]
    fn test_read_bad_checksum() {
        let mut bytes = Frame::new(Command::ReturnOk, vec![]).encode();
        let last = bytes.len() - 1;
        bytes[last] = bytes[last].wrapping_add(1);
        let err = Frame::read_from(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, HuskyLensError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_read_truncated_payload() {
        let mut bytes = Frame::new(Command::ReturnInfo, vec![0x01, 0x00]).encode();
        bytes.truncate(6);
        let err = Frame::read_from(&mut Cursor::new(bytes)).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_read_empty_stream() {
        let err = Frame::read_from(&mut Cursor::new(Vec::new())).unwrap_err();
        assert!(matches!(
            err,
            HuskyLensError::TruncatedResponse {
                expected: 5,
                actual: 0
            }
        ));
    }
}
