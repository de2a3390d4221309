//! # HuskyLens
//!
//! A serial (UART) client for the DFRobot HuskyLens AI camera.
//!
//! This crate speaks the camera's framed command/response protocol over a
//! blocking serial connection and exposes decoded detection results as
//! typed values.
//!
//! ## Features
//!
//! - **Connection lifecycle**: Open on construction, released on drop or
//!   explicit [`Interface::close`](interface::Interface::close).
//! - **Detection queries**: Blocks (bounding boxes) and arrows (tracked
//!   lines), optionally filtered to learned objects or a single id.
//! - **Camera control**: Algorithm selection, learn/forget, custom names
//!   and on-screen text, photos, screenshots, and model save/load.
//! - **Deterministic decoding**: Fixed-layout little-endian frames with
//!   checksum validation; protocol errors leave the connection usable.
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`interface`]: Connection management and the command surface
//! - [`protocol`]: Frame codec, command codes, and record decoding
//! - [`error`]: Custom error types for the crate
//!
//! ## Example
//!
//! ```no_run
//! use huskylens::prelude::*;
//!
//! fn main() -> huskylens::error::Result<()> {
//!     let settings = PortSettings::new("/dev/ttyUSB0");
//!     let mut lens = Interface::open(&settings)?;
//!     if lens.knock()? {
//!         lens.set_algorithm(RecognitionAlgorithm::FaceRecognition)?;
//!         for block in lens.get_blocks()? {
//!             println!("face {} at ({}, {})", block.id, block.x, block.y);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod interface;
pub mod protocol;

/// Re-exports for convenience
pub mod prelude {
    pub use crate::error::{HuskyLensError, Result};
    pub use crate::interface::{Interface, PortSettings, Transport};
    pub use crate::protocol::{Arrow, Block, RecognitionAlgorithm};
}
