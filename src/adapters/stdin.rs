//! Keyboard command source.
//!
//! A background thread blocks on the reader (stdin by default) and forwards
//! every recognised key as an [`AppCommand`] over a channel, so
//! [`poll_command`](CommandSource::poll_command) never blocks the polling
//! loop.  The terminal stays in its normal line mode: keys arrive when the
//! user presses Enter, and nothing needs restoring on exit.
//!
//! End of input is reported as [`AppCommand::Quit`].

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use embassy_time::Instant;
use log::debug;

use crate::app::commands::AppCommand;
use crate::app::ports::CommandSource;

pub struct StdinCommands {
    rx: Receiver<AppCommand>,
}

impl StdinCommands {
    /// Read commands from the process's stdin.
    pub fn spawn() -> io::Result<Self> {
        Self::from_reader(io::stdin())
    }

    /// Read commands from any byte stream.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new().name("stdin-keys".into()).spawn(move || {
            for byte in reader.bytes() {
                let Ok(byte) = byte else { break };
                if let Some(cmd) = AppCommand::from_key(char::from(byte)) {
                    debug!("key {:?} -> {:?}", char::from(byte), cmd);
                    if tx.send(cmd).is_err() {
                        return;
                    }
                }
            }
            let _ = tx.send(AppCommand::Quit);
        })?;
        Ok(Self { rx })
    }
}

impl CommandSource for StdinCommands {
    fn poll_command(&mut self, _now: Instant) -> Option<AppCommand> {
        match self.rx.try_recv() {
            Ok(cmd) => Some(cmd),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(AppCommand::Quit),
        }
    }
}
