// LedWire - UART LED Control Console
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod command;
pub mod session;
pub mod transport;

pub use command::Command;
pub use session::{LinkConfig, Session};
pub use transport::{SerialTransport, Transport};

/// Default serial device: the Raspberry Pi primary UART.
pub const DEFAULT_DEVICE: &str = "/dev/ttyAMA0";

/// Default line speed. Must match the controller firmware's UART setting.
pub const DEFAULT_BAUD: u32 = 19_200;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Failed to open serial port {device}: {source}")]
    Open {
        device: String,
        #[source]
        source: serialport::Error,
    },
    #[error("Serial port error: {0}")]
    Port(#[from] serialport::Error),
    #[error("Serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LinkResult<T> = Result<T, LinkError>;
