//! # Block Module
//!
//! Decoding of detection records from response frame payloads.
//!
//! Each record is ten bytes of u16 little-endian fields. Blocks carry a
//! center point plus a bounding box; arrows (line tracking) carry tail and
//! head points. The identifier is the last field in both layouts.

use crate::error::{HuskyLensError, Result};

/// Record payloads are five u16 fields.
pub const RECORD_LEN: usize = 10;

/// One detected object: a bounding box with an identifier.
///
/// `x` and `y` are the center of the box in screen pixels. An id of zero
/// means the object has not been learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub id: u16,
}

impl Block {
    /// Decodes a block record from a response payload.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let fields = record_fields(payload)?;
        Ok(Block {
            x: fields[0],
            y: fields[1],
            width: fields[2],
            height: fields[3],
            id: fields[4],
        })
    }

    /// Encodes the block into the record wire layout.
    #[must_use]
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        encode_fields([self.x, self.y, self.width, self.height, self.id])
    }

    /// Returns true if the block belongs to a learned object.
    #[must_use]
    pub fn learned(&self) -> bool {
        self.id > 0
    }
}

/// One tracked line, reported by the line-tracking algorithm as an arrow
/// from tail to head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub x_tail: u16,
    pub y_tail: u16,
    pub x_head: u16,
    pub y_head: u16,
    pub id: u16,
}

impl Arrow {
    /// Decodes an arrow record from a response payload.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let fields = record_fields(payload)?;
        Ok(Arrow {
            x_tail: fields[0],
            y_tail: fields[1],
            x_head: fields[2],
            y_head: fields[3],
            id: fields[4],
        })
    }

    /// Encodes the arrow into the record wire layout.
    #[must_use]
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        encode_fields([self.x_tail, self.y_tail, self.x_head, self.y_head, self.id])
    }

    /// Returns true if the arrow belongs to a learned line.
    #[must_use]
    pub fn learned(&self) -> bool {
        self.id > 0
    }

    /// Returns the direction of the arrow in degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        let dy = f64::from(self.y_head) - f64::from(self.y_tail);
        let dx = f64::from(self.x_head) - f64::from(self.x_tail);
        dy.atan2(dx).to_degrees()
    }

    /// Returns the length of the arrow in pixels.
    #[must_use]
    pub fn length(&self) -> f64 {
        let dy = f64::from(self.y_head) - f64::from(self.y_tail);
        let dx = f64::from(self.x_head) - f64::from(self.x_tail);
        (dx * dx + dy * dy).sqrt()
    }
}

fn record_fields(payload: &[u8]) -> Result<[u16; 5]> {
    if payload.len() < RECORD_LEN {
        return Err(HuskyLensError::TruncatedResponse {
            expected: RECORD_LEN,
            actual: payload.len(),
        });
    }
    let mut fields = [0u16; 5];
    for (i, field) in fields.iter_mut().enumerate() {
        *field = u16::from_le_bytes([payload[2 * i], payload[2 * i + 1]]);
    }
    Ok(fields)
}

fn encode_fields(fields: [u16; 5]) -> [u8; RECORD_LEN] {
    let mut bytes = [0u8; RECORD_LEN];
    for (i, field) in fields.iter().enumerate() {
        bytes[2 * i..2 * i + 2].copy_from_slice(&field.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_round_trip() {
        let block = Block {
            x: 160,
            y: 120,
            width: 40,
            height: 56,
            id: 3,
        };
        let decoded = Block::decode(&block.encode()).unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn test_block_decode_known_bytes() {
        // x=0x0140, y=0x0078, w=0x0028, h=0x0038, id=0x0001
        let payload = [0x40, 0x01, 0x78, 0x00, 0x28, 0x00, 0x38, 0x00, 0x01, 0x00];
        let block = Block::decode(&payload).unwrap();
        assert_eq!(block.x, 320);
        assert_eq!(block.y, 120);
        assert_eq!(block.width, 40);
        assert_eq!(block.height, 56);
        assert_eq!(block.id, 1);
    }

    #[test]
    fn test_block_decode_truncated() {
        let err = Block::decode(&[0x40, 0x01, 0x78]).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_block_learned() {
        let mut block = Block {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            id: 0,
        };
        assert!(!block.learned());
        block.id = 1;
        assert!(block.learned());
    }

    #[test]
    fn test_arrow_round_trip() {
        let arrow = Arrow {
            x_tail: 10,
            y_tail: 20,
            x_head: 110,
            y_head: 220,
            id: 2,
        };
        let decoded = Arrow::decode(&arrow.encode()).unwrap();
        assert_eq!(decoded, arrow);
    }

    #[test]
    fn test_arrow_angle_and_length() {
        let arrow = Arrow {
            x_tail: 0,
            y_tail: 0,
            x_head: 3,
            y_head: 4,
            id: 1,
        };
        assert!((arrow.length() - 5.0).abs() < 1e-9);
        let horizontal = Arrow {
            x_tail: 0,
            y_tail: 0,
            x_head: 10,
            y_head: 0,
            id: 1,
        };
        assert!((horizontal.angle() - 0.0).abs() < 1e-9);
        let vertical = Arrow {
            x_tail: 0,
            y_tail: 0,
            x_head: 0,
            y_head: 10,
            id: 1,
        };
        assert!((vertical.angle() - 90.0).abs() < 1e-9);
    }
}
