// src/exec/input.rs

//! Operator input for interactive runs.
//!
//! Reading the terminal blocks, so [`OperatorInput::stdin`] starts one
//! detached OS thread that reads lines for the life of the process and hands
//! them over a channel. That thread is never joined: it may sit in a blocking
//! read after the last program has exited, and it ends when stdin reaches EOF
//! or the process exits. The per-run relay task, by contrast, is cancelled
//! explicitly when its program finishes.
//!
//! Lines typed while no program is running stay queued and go to the next
//! interactive program, the way type-ahead works in a terminal.

use std::io::BufRead;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

/// Shared, cloneable source of operator lines (each including its `\n`).
#[derive(Debug, Clone)]
pub struct OperatorInput {
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl OperatorInput {
    /// Feed from the process's own stdin through a detached reader thread.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let spawned = std::thread::Builder::new()
            .name("operator-stdin".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                let mut handle = stdin.lock();
                loop {
                    let mut line = String::new();
                    match handle.read_line(&mut line) {
                        Ok(0) => {
                            debug!("operator stdin reached EOF");
                            break;
                        }
                        Ok(_) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            debug!(error = %e, "reading operator stdin failed");
                            break;
                        }
                    }
                }
            });

        if let Err(e) = spawned {
            warn!(error = %e, "could not start operator input thread; interactive input disabled");
        }

        Self::from_channel(rx)
    }

    /// Feed from an arbitrary channel (scripted sessions, tests).
    pub fn from_channel(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(rx)),
        }
    }

    pub(crate) fn lines(&self) -> Arc<Mutex<mpsc::UnboundedReceiver<String>>> {
        Arc::clone(&self.lines)
    }
}
