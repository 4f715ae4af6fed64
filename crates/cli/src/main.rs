// LedWire - UART LED Control Console
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

mod menu;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};

use ledwire_core::{LinkConfig, Session, DEFAULT_BAUD, DEFAULT_DEVICE};

const EXIT_CONNECT_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "LedWire UART LED control console",
    long_about = None
)]
struct Cli {
    /// Serial device the LED controller is attached to
    #[arg(short, long, default_value = DEFAULT_DEVICE)]
    port: String,

    /// Line speed in baud; must match the controller firmware
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Enable debug-level logging
    #[arg(short, long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let config = LinkConfig {
        device: cli.port,
        baud_rate: cli.baud,
        ..LinkConfig::default()
    };

    println!("LedWire UART LED control");
    println!("Port: {}, baud rate: {}", config.device, config.baud_rate);

    let mut session = match Session::open(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("{}", e);
            log_known_ports();
            return ExitCode::from(EXIT_CONNECT_ERROR);
        }
    };
    println!("Serial port opened successfully");

    let stdin = io::stdin();
    let result = menu::run_menu(stdin.lock(), io::stdout(), &mut session);

    // Dropping the session closes the port on both exit paths.
    drop(session);

    match result {
        Ok(()) => {
            info!("Serial port closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(EXIT_RUNTIME_ERROR)
        }
    }
}

/// On open failure, show which serial devices actually exist on this host.
fn log_known_ports() {
    match serialport::available_ports() {
        Ok(ports) if ports.is_empty() => info!("No serial ports detected on this host"),
        Ok(ports) => {
            for port in ports {
                info!("Detected serial port: {}", port.port_name);
            }
        }
        Err(e) => debug!("Could not enumerate serial ports: {}", e),
    }
}
