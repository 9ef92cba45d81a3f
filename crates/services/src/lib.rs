#![forbid(unsafe_code)]

pub mod console;
pub mod error;
pub mod quiz;
pub mod session;

pub use error::SessionError;

pub use console::{
    Console, ConsoleError, LineSink, LineSource, ReaderSource, RecordingSink, ScriptedSource,
    WriterSink,
};
pub use quiz::{QuizPlan, Verdict, grade_answer};
pub use session::{Command, Session, SessionConfig};
