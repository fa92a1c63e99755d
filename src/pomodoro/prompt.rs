//! Waiting for the user to confirm they are ready for the next interval.

use std::io::{self, BufRead, BufReader, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::PomodoroError;

use super::cancel::CancellationToken;
use super::interval::IntervalKind;

/// How often a pending prompt checks for interruption.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Blocks until the user acknowledges the next interval.
#[cfg_attr(test, mockall::automock)]
pub trait Acknowledger {
    /// Wait for acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` if `token` is cancelled while waiting.
    fn acknowledge(
        &mut self,
        kind: IntervalKind,
        token: &CancellationToken,
    ) -> Result<(), PomodoroError>;
}

type LineResult = io::Result<Option<String>>;

/// Reads one line of input per acknowledgment.
///
/// Lines are read on a helper thread so that a pending prompt still notices
/// Ctrl+C.
pub struct LineAcknowledger {
    source: Option<Box<dyn BufRead + Send>>,
    lines: Option<Receiver<LineResult>>,
    prompt: String,
}

impl LineAcknowledger {
    /// Acknowledge with Enter on stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(io::stdin()))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            source: Some(Box::new(reader)),
            lines: None,
            prompt: "Press Enter to continue...".to_string(),
        }
    }

    fn lines(&mut self) -> &Receiver<LineResult> {
        let source = self.source.take();
        self.lines.get_or_insert_with(|| {
            // Rendezvous channel: at most one line is read ahead.
            let (tx, rx) = mpsc::sync_channel(0);
            if let Some(mut reader) = source {
                thread::spawn(move || loop {
                    let mut line = String::new();
                    let next = match reader.read_line(&mut line) {
                        Ok(0) => Ok(None),
                        Ok(_) => Ok(Some(line)),
                        Err(e) => Err(e),
                    };
                    let done = !matches!(next, Ok(Some(_)));
                    if tx.send(next).is_err() || done {
                        break;
                    }
                });
            }
            rx
        })
    }
}

impl Acknowledger for LineAcknowledger {
    fn acknowledge(
        &mut self,
        kind: IntervalKind,
        token: &CancellationToken,
    ) -> Result<(), PomodoroError> {
        if token.is_cancelled() {
            return Err(PomodoroError::Interrupted);
        }

        print!("{}", self.prompt);
        io::stdout().flush()?;

        let lines = self.lines();
        loop {
            match lines.recv_timeout(POLL_INTERVAL) {
                Ok(Ok(Some(_))) => {
                    debug!(%kind, "interval acknowledged");
                    return Ok(());
                }
                Ok(Err(e)) => return Err(PomodoroError::Io(e)),
                Ok(Ok(None)) | Err(RecvTimeoutError::Disconnected) => {
                    return Err(PomodoroError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "input closed while waiting for acknowledgment",
                    )));
                }
                Err(RecvTimeoutError::Timeout) => {
                    if token.is_cancelled() {
                        println!();
                        return Err(PomodoroError::Interrupted);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_acknowledges_each_line() {
        let mut ack = LineAcknowledger::from_reader(Cursor::new("\n\n"));
        let token = CancellationToken::new();

        ack.acknowledge(IntervalKind::Work, &token).unwrap();
        ack.acknowledge(IntervalKind::ShortBreak, &token).unwrap();
    }

    #[test]
    fn test_end_of_input_is_error() {
        let mut ack = LineAcknowledger::from_reader(Cursor::new("\n"));
        let token = CancellationToken::new();

        ack.acknowledge(IntervalKind::Work, &token).unwrap();
        let err = ack.acknowledge(IntervalKind::Work, &token).unwrap_err();
        assert!(matches!(err, PomodoroError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_cancelled_before_prompt() {
        let mut ack = LineAcknowledger::from_reader(Cursor::new("\n"));
        let token = CancellationToken::new();
        token.cancel();

        let err = ack.acknowledge(IntervalKind::Work, &token).unwrap_err();
        assert!(err.is_interrupted());
    }

    /// A reader that never produces a line.
    struct Blocking;

    impl io::Read for Blocking {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            thread::sleep(Duration::from_secs(3600));
            Ok(0)
        }
    }

    #[test]
    fn test_cancel_while_waiting() {
        let mut ack = LineAcknowledger::from_reader(BufReader::new(Blocking));
        let token = CancellationToken::new();
        let canceller = token.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            canceller.cancel();
        });

        let err = ack.acknowledge(IntervalKind::Work, &token).unwrap_err();
        assert!(err.is_interrupted());
        handle.join().unwrap();
    }
}
