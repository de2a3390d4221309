//! # Protocol Module
//!
//! This module implements the HuskyLens wire protocol: command codes,
//! frame encoding/decoding with checksum validation, and the decoding of
//! block and arrow records from response payloads.
//!
//! Every exchange is a framed request followed by one or more framed
//! responses; the byte layout is fixed by the camera firmware and is
//! treated here as an external contract.

pub mod block;
pub mod command;
pub mod frame;

pub use block::{Arrow, Block};
pub use command::{Command, RecognitionAlgorithm};
pub use frame::{Frame, HEADER, MAX_PAYLOAD};
