//! Persistence for the session transcript.

use std::fs;
use std::io;
use std::path::Path;

/// Write the transcript to a file, one entry per line, replacing any
/// existing content.
///
/// # Errors
///
/// Returns the underlying `io::Error` if the file cannot be written.
pub fn save(path: impl AsRef<Path>, lines: &[String]) -> io::Result<()> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(path, contents)
}
