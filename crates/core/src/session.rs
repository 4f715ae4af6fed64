// LedWire - UART LED Control Console
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::command::Command;
use crate::transport::{SerialTransport, Transport};
use crate::LinkResult;

/// Connection parameters for the LED controller link.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Serial device path.
    pub device: String,
    /// Line speed; must match the firmware's UART setting.
    pub baud_rate: u32,
    /// Blocking read timeout on the port.
    pub read_timeout: Duration,
    /// Pause between sending a command and polling for the reply.
    pub response_delay: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device: crate::DEFAULT_DEVICE.to_string(),
            baud_rate: crate::DEFAULT_BAUD,
            read_timeout: Duration::from_secs(1),
            response_delay: Duration::from_millis(100),
        }
    }
}

/// One serial connection and the synchronous command/response cycle over it.
///
/// The session owns the link exclusively. At most one command is in flight at
/// a time; `send_command` does not return until the previous exchange is
/// resolved as a reply or a timeout. Dropping the session closes the port.
pub struct Session {
    transport: Box<dyn Transport>,
    response_delay: Duration,
}

impl Session {
    /// Open the configured serial device with 8-N-1 framing.
    pub fn open(config: &LinkConfig) -> LinkResult<Self> {
        let transport =
            SerialTransport::open(&config.device, config.baud_rate, config.read_timeout)?;
        Ok(Self::with_transport(
            Box::new(transport),
            config.response_delay,
        ))
    }

    /// Build a session over an already-open transport.
    pub fn with_transport(transport: Box<dyn Transport>, response_delay: Duration) -> Self {
        Self {
            transport,
            response_delay,
        }
    }

    /// Send one command and wait briefly for a single reply line.
    ///
    /// Returns `Ok(None)` when nothing arrived within the polling window;
    /// that is a normal outcome, not an error.
    pub fn send_command(&mut self, command: Command) -> LinkResult<Option<String>> {
        let mut frame = command.wire_token().as_bytes().to_vec();
        frame.push(b'\n');
        self.transport.write_all(&frame)?;
        info!("Sent: {}", command);

        thread::sleep(self.response_delay);

        if self.transport.bytes_available()? == 0 {
            debug!("No reply within {:?}", self.response_delay);
            return Ok(None);
        }

        let raw = self.transport.read_line()?;
        let reply = String::from_utf8_lossy(&raw).trim_end().to_string();
        debug!("Received {} byte(s)", raw.len());
        Ok(Some(reply))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::Session;
    use crate::command::Command;
    use crate::transport::Transport;
    use crate::{LinkError, LinkResult};

    struct FakeTransport {
        written: Arc<Mutex<Vec<u8>>>,
        incoming: VecDeque<u8>,
    }

    impl FakeTransport {
        fn new(incoming: &[u8]) -> (Self, Arc<Mutex<Vec<u8>>>) {
            let written = Arc::new(Mutex::new(Vec::new()));
            let transport = Self {
                written: written.clone(),
                incoming: incoming.iter().copied().collect(),
            };
            (transport, written)
        }
    }

    impl Transport for FakeTransport {
        fn write_all(&mut self, bytes: &[u8]) -> LinkResult<()> {
            self.written.lock().unwrap().extend_from_slice(bytes);
            Ok(())
        }

        fn bytes_available(&mut self) -> LinkResult<u32> {
            Ok(self.incoming.len() as u32)
        }

        fn read_line(&mut self) -> LinkResult<Vec<u8>> {
            let mut line = Vec::new();
            while let Some(b) = self.incoming.pop_front() {
                line.push(b);
                if b == b'\n' {
                    break;
                }
            }
            Ok(line)
        }
    }

    /// Transport that fails every operation, as after a hardware disconnect.
    struct BrokenTransport;

    impl Transport for BrokenTransport {
        fn write_all(&mut self, _bytes: &[u8]) -> LinkResult<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone").into())
        }

        fn bytes_available(&mut self) -> LinkResult<u32> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone").into())
        }

        fn read_line(&mut self) -> LinkResult<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone").into())
        }
    }

    fn session_over(transport: FakeTransport) -> Session {
        Session::with_transport(Box::new(transport), Duration::ZERO)
    }

    #[test]
    fn test_commands_write_newline_terminated_tokens() {
        for cmd in Command::ALL {
            let (transport, written) = FakeTransport::new(b"");
            let mut session = session_over(transport);

            session.send_command(cmd).unwrap();

            let expected = format!("{}\n", cmd.wire_token());
            assert_eq!(*written.lock().unwrap(), expected.as_bytes());
        }
    }

    #[test]
    fn test_no_pending_bytes_reports_no_response() {
        let (transport, _written) = FakeTransport::new(b"");
        let mut session = session_over(transport);

        assert_eq!(session.send_command(Command::On).unwrap(), None);
    }

    #[test]
    fn test_reply_line_is_trimmed() {
        let (transport, written) = FakeTransport::new(b"LED_ON\r\n");
        let mut session = session_over(transport);

        let reply = session.send_command(Command::On).unwrap();

        assert_eq!(*written.lock().unwrap(), b"ON\n");
        assert_eq!(reply.as_deref(), Some("LED_ON"));
    }

    #[test]
    fn test_reads_exactly_one_line_per_exchange() {
        let (transport, _written) = FakeTransport::new(b"LED_ON\nLED_OFF\n");
        let mut session = session_over(transport);

        let first = session.send_command(Command::On).unwrap();
        let second = session.send_command(Command::Off).unwrap();

        assert_eq!(first.as_deref(), Some("LED_ON"));
        assert_eq!(second.as_deref(), Some("LED_OFF"));
    }

    #[test]
    fn test_transport_failure_is_fatal() {
        let mut session = Session::with_transport(Box::new(BrokenTransport), Duration::ZERO);

        let err = session.send_command(Command::Toggle).unwrap_err();
        assert!(matches!(err, LinkError::Io(_)));
    }
}
