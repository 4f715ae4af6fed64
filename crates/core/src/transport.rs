// LedWire - UART LED Control Console
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::{DataBits, Parity, SerialPort, StopBits};
use tracing::debug;

use crate::{LinkError, LinkResult};

/// Minimal capability surface of the serial link, so tests can substitute an
/// in-memory fake for a live device.
pub trait Transport {
    /// Write the full buffer to the link.
    fn write_all(&mut self, bytes: &[u8]) -> LinkResult<()>;

    /// Number of received bytes readable without blocking.
    fn bytes_available(&mut self) -> LinkResult<u32>;

    /// Read up to and including one newline, or until the read timeout.
    fn read_line(&mut self) -> LinkResult<Vec<u8>>;
}

/// Live serial device with 8-N-1 framing. Dropping it closes the port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn open(device: &str, baud_rate: u32, read_timeout: Duration) -> LinkResult<Self> {
        let port = serialport::new(device, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(read_timeout)
            .open()
            .map_err(|source| LinkError::Open {
                device: device.to_string(),
                source,
            })?;
        debug!("Opened {} at {} baud", device, baud_rate);
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> LinkResult<()> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn bytes_available(&mut self) -> LinkResult<u32> {
        Ok(self.port.bytes_to_read()?)
    }

    fn read_line(&mut self) -> LinkResult<Vec<u8>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    line.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                // The remote stopped mid-line; report what arrived so far.
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(line)
    }
}
