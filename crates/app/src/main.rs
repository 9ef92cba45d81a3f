use std::env;
use std::io;
use std::path::PathBuf;

use services::{Console, ReaderSource, Session, SessionConfig, SessionError, WriterSink};

/// Resolve import/export paths from the command line.
///
/// A flag is any argument starting with `-` whose following argument does
/// not; `-import` and `-export` are honored and everything else is ignored.
/// The scan does not consume values, and a repeated flag's last occurrence
/// wins.
fn parse_args(args: &[String]) -> SessionConfig {
    let mut config = SessionConfig::default();
    for (flag, value) in args.iter().zip(args.iter().skip(1)) {
        if !flag.starts_with('-') || value.starts_with('-') {
            continue;
        }
        match &flag[1..] {
            "import" => config.import_path = Some(PathBuf::from(value)),
            "export" => config.export_path = Some(PathBuf::from(value)),
            _ => {}
        }
    }
    config
}

fn run() -> Result<(), SessionError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = parse_args(&args);

    let console = Console::new(
        Box::new(ReaderSource::new(io::stdin().lock())),
        Box::new(WriterSink::new(io::stdout())),
    );
    Session::new(console, config).run()
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
