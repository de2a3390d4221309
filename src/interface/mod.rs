//! # Interface Module
//!
//! The connection to the HuskyLens: serial port lifecycle plus the
//! request/response exchange for every documented command.
//!
//! All I/O is synchronous and blocking; each call writes one command
//! frame and reads the camera's reply before returning. The port is
//! released when the [`Interface`] is dropped or [`Interface::close`] is
//! called, after which every command fails with
//! [`HuskyLensError::ConnectionClosed`].

pub mod settings;

use std::io::{self, Read, Write};

use log::{debug, info};
use serialport::{ClearBuffer, SerialPort};

use crate::error::{HuskyLensError, Result};
use crate::protocol::{Arrow, Block, Command, Frame, MAX_PAYLOAD, RecognitionAlgorithm};

pub use settings::{DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT, PortSettings};

/// HuskyLens screen width in pixels.
pub const SCREEN_WIDTH: u16 = 320;

/// HuskyLens screen height in pixels.
pub const SCREEN_HEIGHT: u16 = 240;

/// Longest name `set_name` can carry: one frame payload minus the id,
/// length, and NUL terminator bytes.
pub const MAX_NAME_LEN: usize = MAX_PAYLOAD - 3;

/// Longest text `set_text` can carry: one frame payload minus the length
/// and position bytes.
pub const MAX_TEXT_LEN: usize = MAX_PAYLOAD - 4;

/// Byte transport carrying the protocol.
///
/// [`discard_input`](Transport::discard_input) drops bytes already
/// buffered on the receive side, so a response that arrived after an
/// earlier exchange timed out is never paired with a new request. The
/// default is a no-op for transports without such a buffer.
pub trait Transport: Read + Write {
    /// Discards any received bytes not yet read.
    fn discard_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for Box<dyn SerialPort> {
    fn discard_input(&mut self) -> io::Result<()> {
        self.clear(ClearBuffer::Input)
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

/// Lists the serial port names available on the system.
pub fn available_ports() -> Result<Vec<String>> {
    let ports =
        serialport::available_ports().map_err(|e| HuskyLensError::PortEnumerate(e.to_string()))?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

/// A connection to a HuskyLens camera.
///
/// Generic over the [`Transport`] so tests can substitute a scripted
/// port; real connections go through [`Interface::open`] and use the
/// system serial port.
pub struct Interface<P: Transport = Box<dyn SerialPort>> {
    port: Option<P>,
}

impl Interface {
    /// Opens the serial port described by `settings`.
    pub fn open(settings: &PortSettings) -> Result<Self> {
        let port = serialport::new(&settings.port_name, settings.baud_rate)
            .timeout(settings.timeout)
            .open()
            .map_err(|e| HuskyLensError::port_open(&settings.port_name, e.to_string()))?;
        info!(
            "Opened {} at {} baud",
            settings.port_name, settings.baud_rate
        );
        Ok(Interface { port: Some(port) })
    }
}

impl<P: Transport> Interface<P> {
    /// Wraps an already open transport.
    #[must_use]
    pub fn from_port(port: P) -> Self {
        Interface { port: Some(port) }
    }

    /// Returns true while the connection is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    /// Closes the connection and releases the port.
    ///
    /// Dropping the interface has the same effect; subsequent commands
    /// fail with [`HuskyLensError::ConnectionClosed`].
    pub fn close(&mut self) {
        if self.port.take().is_some() {
            info!("Connection closed");
        }
    }

    /// Checks whether the camera is present and responsive.
    ///
    /// A response that never arrives (or arrives incomplete) within the
    /// port timeout means "camera absent" and yields `Ok(false)`; frames
    /// that arrive corrupted still fail with a protocol error.
    pub fn knock(&mut self) -> Result<bool> {
        self.send_command(Command::RequestKnock, &[])?;
        match self.read_response() {
            Ok(frame) => Ok(frame.is_ok()),
            Err(e) if e.is_truncated() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Selects the detection algorithm running on the camera.
    pub fn set_algorithm(&mut self, algorithm: RecognitionAlgorithm) -> Result<bool> {
        info!("Switching to {algorithm}");
        self.request_ok(Command::RequestAlgorithm, &algorithm.code().to_le_bytes())
    }

    /// Learns the currently recognized object under the given id.
    pub fn learn(&mut self, object_id: u16) -> Result<bool> {
        self.request_ok(Command::RequestLearn, &object_id.to_le_bytes())
    }

    /// Forgets all learned objects for the current algorithm.
    pub fn forget(&mut self) -> Result<bool> {
        self.request_ok(Command::RequestForget, &[])
    }

    /// Returns all blocks currently detected by the camera.
    pub fn get_blocks(&mut self) -> Result<Vec<Block>> {
        self.send_command(Command::RequestBlocks, &[])?;
        self.read_records(Block::decode)
    }

    /// Returns the detected blocks that belong to learned objects.
    pub fn get_blocks_learned(&mut self) -> Result<Vec<Block>> {
        self.send_command(Command::RequestBlocksLearned, &[])?;
        self.read_records(Block::decode)
    }

    /// Returns the detected blocks with the given id.
    pub fn get_blocks_by_id(&mut self, object_id: u16) -> Result<Vec<Block>> {
        self.send_command(Command::RequestBlocksById, &object_id.to_le_bytes())?;
        self.read_records(Block::decode)
    }

    /// Returns all arrows currently detected by the camera.
    pub fn get_arrows(&mut self) -> Result<Vec<Arrow>> {
        self.send_command(Command::RequestArrows, &[])?;
        self.read_records(Arrow::decode)
    }

    /// Returns the detected arrows that belong to learned lines.
    pub fn get_arrows_learned(&mut self) -> Result<Vec<Arrow>> {
        self.send_command(Command::RequestArrowsLearned, &[])?;
        self.read_records(Arrow::decode)
    }

    /// Returns the detected arrows with the given id.
    pub fn get_arrows_by_id(&mut self, object_id: u16) -> Result<Vec<Arrow>> {
        self.send_command(Command::RequestArrowsById, &object_id.to_le_bytes())?;
        self.read_records(Arrow::decode)
    }

    /// Takes a photo and saves it to the camera's SD card.
    pub fn photo(&mut self) -> Result<bool> {
        self.request_ok(Command::RequestPhoto, &[])
    }

    /// Saves a screenshot of the camera UI to the SD card.
    ///
    /// The camera acknowledges even when no SD card is inserted.
    pub fn screenshot(&mut self) -> Result<bool> {
        self.request_ok(Command::RequestSaveScreenshot, &[])
    }

    /// Sets a custom name for the object learned under the given id.
    pub fn set_name(&mut self, name: &str, object_id: u8) -> Result<bool> {
        let ascii = ascii_bytes(name);
        if ascii.len() > MAX_NAME_LEN {
            return Err(HuskyLensError::TextTooLong {
                len: ascii.len(),
                max: MAX_NAME_LEN,
            });
        }
        let mut data = Vec::with_capacity(ascii.len() + 3);
        data.push(object_id);
        // Length includes the NUL terminator, per the protocol.
        data.push(ascii.len() as u8 + 1);
        data.extend_from_slice(&ascii);
        data.push(0);
        self.request_ok(Command::RequestCustomNames, &data)
    }

    /// Shows a custom text at the given screen position.
    pub fn set_text(&mut self, text: &str, x: u16, y: u16) -> Result<bool> {
        if x > SCREEN_WIDTH || y > SCREEN_HEIGHT {
            return Err(HuskyLensError::InvalidTextPosition { x, y });
        }

        let ascii = ascii_bytes(text);
        if ascii.len() > MAX_TEXT_LEN {
            return Err(HuskyLensError::TextTooLong {
                len: ascii.len(),
                max: MAX_TEXT_LEN,
            });
        }
        let mut data = Vec::with_capacity(ascii.len() + 4);
        data.push(ascii.len() as u8);
        // The x coordinate does not fit one byte; the protocol carries an
        // overflow flag followed by the remainder.
        if x >= 0xFF {
            data.push(0xFF);
            data.push((x % 0xFF) as u8);
        } else {
            data.push(0);
            data.push(x as u8);
        }
        data.push(y as u8);
        data.extend_from_slice(&ascii);
        self.request_ok(Command::RequestCustomText, &data)
    }

    /// Clears all custom texts from the camera screen.
    pub fn clear_text(&mut self) -> Result<bool> {
        self.request_ok(Command::RequestClearText, &[])
    }

    /// Saves the current algorithm's model to the SD card slot.
    pub fn save_model(&mut self, file_number: u16) -> Result<bool> {
        self.request_ok(Command::RequestSendKnowledges, &file_number.to_le_bytes())
    }

    /// Loads a model from the SD card slot.
    pub fn load_model(&mut self, file_number: u16) -> Result<bool> {
        self.request_ok(Command::RequestReceiveKnowledges, &file_number.to_le_bytes())
    }

    /// Checks whether the camera is the Pro hardware revision.
    pub fn is_pro(&mut self) -> Result<bool> {
        self.send_command(Command::RequestIsPro, &[])?;
        let frame = self.read_response()?;
        // The answer is the last byte before the checksum: 0x01 for Pro.
        let answer = frame.payload.last().copied().unwrap_or(frame.command);
        Ok(answer == 0x01)
    }

    fn port_mut(&mut self) -> Result<&mut P> {
        self.port.as_mut().ok_or(HuskyLensError::ConnectionClosed)
    }

    fn send_command(&mut self, command: Command, payload: &[u8]) -> Result<()> {
        info!("{command}");
        let bytes = Frame::new(command, payload).encode();
        debug!("write: {}", hex::encode(&bytes));
        let port = self.port_mut()?;
        // A response that arrived after a previous exchange gave up may
        // still be buffered; drop it so it cannot answer this command.
        port.discard_input()
            .map_err(|e| HuskyLensError::port_read(e.to_string()))?;
        port.write_all(&bytes)
            .map_err(|e| HuskyLensError::port_write(e.to_string()))?;
        port.flush()
            .map_err(|e| HuskyLensError::port_write(e.to_string()))?;
        Ok(())
    }

    fn read_response(&mut self) -> Result<Frame> {
        Frame::read_from(self.port_mut()?)
    }

    fn request_ok(&mut self, command: Command, payload: &[u8]) -> Result<bool> {
        self.send_command(command, payload)?;
        Ok(self.read_response()?.is_ok())
    }

    /// Reads one info frame announcing the result count, then that many
    /// record frames.
    fn read_records<T>(&mut self, decode: fn(&[u8]) -> Result<T>) -> Result<Vec<T>> {
        let info = self.read_response()?;
        if !info.is_info() {
            return Err(HuskyLensError::UnexpectedResponse {
                command: info.command,
            });
        }
        if info.payload.len() < 2 {
            return Err(HuskyLensError::TruncatedResponse {
                expected: 2,
                actual: info.payload.len(),
            });
        }
        let count = u16::from_le_bytes([info.payload[0], info.payload[1]]);

        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let frame = self.read_response()?;
            records.push(decode(&frame.payload)?);
        }
        Ok(records)
    }
}

/// Encodes text as ASCII, replacing anything the camera cannot display.
fn ascii_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}
