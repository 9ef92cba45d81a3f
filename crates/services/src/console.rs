//! The console seam: line-oriented input and output with a transcript.
//!
//! The session never touches stdin or stdout directly. It talks to a
//! [`Console`], which forwards to a [`LineSource`] and a [`LineSink`] and
//! keeps a transcript of everything that crossed the boundary. The `log`
//! command is just that transcript written to disk.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use thiserror::Error;

/// The line that terminates a session from any prompt.
const EXIT_LINE: &str = "exit";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConsoleError {
    /// The user typed the exit line. Not a failure; callers unwind to the
    /// session shutdown path.
    #[error("exit requested")]
    Exit,

    /// The source ran out of lines without the user typing the exit line.
    #[error("input stream ended")]
    Ended,

    #[error(transparent)]
    Io(#[from] io::Error),
}

//
// ─── SOURCES AND SINKS ─────────────────────────────────────────────────────────
//

/// One line of input per call, without the trailing newline.
pub trait LineSource {
    /// # Errors
    ///
    /// Returns `ConsoleError::Ended` at end of input and `ConsoleError::Io`
    /// for read failures.
    fn next_line(&mut self) -> Result<String, ConsoleError>;
}

/// One line of output per call; the sink supplies the newline.
pub trait LineSink {
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` for write failures.
    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError>;
}

/// Adapts any buffered reader into a [`LineSource`].
pub struct ReaderSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Ended);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// Adapts any writer into a [`LineSink`], flushing after every line so
/// prompts reach the user before a blocking read.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// A [`LineSource`] fed from a fixed script, for driving sessions in tests.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn next_line(&mut self) -> Result<String, ConsoleError> {
        self.lines.pop_front().ok_or(ConsoleError::Ended)
    }
}

/// A [`LineSink`] that collects output into a shared buffer.
///
/// Clones share the same buffer, so a test can keep one handle and hand the
/// other to the console under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl LineSink for RecordingSink {
    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.lines.borrow_mut().push(line.to_owned());
        Ok(())
    }
}

//
// ─── CONSOLE ───────────────────────────────────────────────────────────────────
//

/// Line console with a transcript of the whole exchange.
///
/// Output lines are recorded verbatim; input lines are recorded prefixed
/// with `"> "`. The exit line short-circuits before recording, so it never
/// appears in the transcript.
pub struct Console {
    source: Box<dyn LineSource>,
    sink: Box<dyn LineSink>,
    transcript: Vec<String>,
}

impl Console {
    #[must_use]
    pub fn new(source: Box<dyn LineSource>, sink: Box<dyn LineSink>) -> Self {
        Self {
            source,
            sink,
            transcript: Vec::new(),
        }
    }

    /// Write one line and record it.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` for write failures.
    pub fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.transcript.push(line.to_owned());
        self.sink.write_line(line)
    }

    /// Read one line and record it.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Exit` when the line is exactly the exit line,
    /// `ConsoleError::Ended` at end of input, and `ConsoleError::Io` for
    /// read failures.
    pub fn read_line(&mut self) -> Result<String, ConsoleError> {
        let line = self.source.next_line()?;
        if line == EXIT_LINE {
            return Err(ConsoleError::Exit);
        }
        self.transcript.push(format!("> {line}"));
        Ok(line)
    }

    /// Everything written and read so far, in order.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
