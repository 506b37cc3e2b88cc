// src/exec/capture.rs

//! Append-only capture logs and the pumps that fill them.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::debug;

/// Byte log shared between the activities feeding one captured stream.
///
/// Appends are serialized by a mutex, so concurrent writers never interleave
/// inside a chunk and each writer's chunks keep their order.
#[derive(Debug, Clone, Default)]
pub struct CaptureLog {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, chunk: &[u8]) {
        let mut guard = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        guard.extend_from_slice(chunk);
    }

    /// Everything appended so far, decoded lossily as UTF-8.
    pub fn snapshot(&self) -> String {
        let guard = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&guard).into_owned()
    }
}

/// Where a pump mirrors what it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    Stdout,
    Stderr,
}

/// Read `reader` to EOF, appending each chunk to `log` and optionally
/// echoing it to the console.
///
/// Reads are chunked rather than line-based so prompts without a trailing
/// newline show up immediately. A read error ends the stream quietly.
pub async fn pump<R>(mut reader: R, log: CaptureLog, echo: Option<Echo>, label: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                log.append(&buf[..n]);
                match echo {
                    Some(Echo::Stdout) => echo_chunk(tokio::io::stdout(), &buf[..n]).await,
                    Some(Echo::Stderr) => echo_chunk(tokio::io::stderr(), &buf[..n]).await,
                    None => {}
                }
            }
            Err(e) => {
                debug!(stream = label, error = %e, "stream read failed; treating as end of stream");
                break;
            }
        }
    }
    debug!(stream = label, "stream drained");
}

async fn echo_chunk<W>(mut out: W, chunk: &[u8])
where
    W: tokio::io::AsyncWrite + Unpin,
{
    if out.write_all(chunk).await.is_ok() {
        let _ = out.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pump_collects_everything_in_order() {
        let log = CaptureLog::new();
        let data: &[u8] = b"first\nsecond\n";
        pump(data, log.clone(), None, "test").await;
        assert_eq!(log.snapshot(), "first\nsecond\n");
    }

    #[test]
    fn snapshot_replaces_invalid_utf8() {
        let log = CaptureLog::new();
        log.append(b"ok ");
        log.append(&[0xff, 0xfe]);
        assert!(log.snapshot().starts_with("ok "));
        assert!(log.snapshot().contains('\u{fffd}'));
    }
}
