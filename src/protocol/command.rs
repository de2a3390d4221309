//! # Command Module
//!
//! Command codes understood by the HuskyLens firmware, plus the
//! recognition algorithm selector.

use std::fmt;

/// Command codes of the HuskyLens serial protocol.
///
/// `Request*` codes are sent by the host; `Return*` codes appear in the
/// command field of response frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    RequestBlocks = 0x21,
    RequestArrows = 0x22,
    RequestBlocksLearned = 0x24,
    RequestArrowsLearned = 0x25,
    RequestBlocksById = 0x27,
    RequestArrowsById = 0x28,
    ReturnInfo = 0x29,
    ReturnBlock = 0x2A,
    ReturnArrow = 0x2B,
    RequestKnock = 0x2C,
    RequestAlgorithm = 0x2D,
    ReturnOk = 0x2E,
    RequestCustomNames = 0x2F,
    RequestPhoto = 0x30,
    RequestSendKnowledges = 0x32,
    RequestReceiveKnowledges = 0x33,
    RequestCustomText = 0x34,
    RequestClearText = 0x35,
    RequestLearn = 0x36,
    RequestForget = 0x37,
    RequestSaveScreenshot = 0x39,
    RequestIsPro = 0x3B,
}

impl Command {
    /// Returns the wire code of this command.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Detection algorithm running on the camera.
///
/// Blocks and arrows are only meaningful in the context of the algorithm
/// that was active when they were retrieved; line tracking reports arrows,
/// all other modes report blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum RecognitionAlgorithm {
    FaceRecognition = 0x00,
    ObjectTracking = 0x01,
    ObjectRecognition = 0x02,
    LineTracking = 0x03,
    ColorRecognition = 0x04,
    TagRecognition = 0x05,
    ObjectClassification = 0x06,
}

impl RecognitionAlgorithm {
    /// Returns the algorithm code as sent on the wire (u16 little-endian).
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for RecognitionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceRecognition => write!(f, "face recognition"),
            Self::ObjectTracking => write!(f, "object tracking"),
            Self::ObjectRecognition => write!(f, "object recognition"),
            Self::LineTracking => write!(f, "line tracking"),
            Self::ColorRecognition => write!(f, "color recognition"),
            Self::TagRecognition => write!(f, "tag recognition"),
            Self::ObjectClassification => write!(f, "object classification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_codes() {
        assert_eq!(Command::RequestKnock.code(), 0x2C);
        assert_eq!(Command::ReturnOk.code(), 0x2E);
        assert_eq!(Command::ReturnInfo.code(), 0x29);
        assert_eq!(Command::RequestBlocks.code(), 0x21);
    }

    #[test]
    fn test_algorithm_codes() {
        assert_eq!(RecognitionAlgorithm::FaceRecognition.code(), 0x00);
        assert_eq!(RecognitionAlgorithm::ObjectClassification.code(), 0x06);
    }

    #[test]
    fn test_algorithm_display() {
        let name = RecognitionAlgorithm::LineTracking.to_string();
        assert_eq!(name, "line tracking");
    }
}
