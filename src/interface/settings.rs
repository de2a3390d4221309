//! # Settings Module
//!
//! Serial port settings for the HuskyLens connection.

use std::time::Duration;

/// Baud rate the HuskyLens UART protocol mode uses out of the box.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default read timeout; the camera normally answers well within this.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Serial port settings for a HuskyLens connection.
#[derive(Clone, Debug)]
pub struct PortSettings {
    pub port_name: String,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl PortSettings {
    /// Creates settings for the given device path with protocol defaults.
    #[must_use]
    pub fn new(port_name: impl Into<String>) -> Self {
        PortSettings {
            port_name: port_name.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the baud rate.
    ///
    /// The camera must be configured for the same rate on its side.
    #[must_use]
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the read timeout for responses.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PortSettings::new("/dev/ttyUSB0");
        assert_eq!(settings.port_name, "/dev/ttyUSB0");
        assert_eq!(settings.baud_rate, DEFAULT_BAUD_RATE);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_overrides() {
        let settings = PortSettings::new("/dev/ttyAMA0")
            .with_baud_rate(115_200)
            .with_timeout(Duration::from_millis(500));
        assert_eq!(settings.baud_rate, 115_200);
        assert_eq!(settings.timeout, Duration::from_millis(500));
    }
}
