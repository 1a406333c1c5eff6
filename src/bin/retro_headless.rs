//! Headless Demo Runner
//!
//! Replays a recorded demo document without a display and prints the
//! final grid state. Useful for testing demos and generating
//! deterministic snapshots in automation.
//!
//! Playback is driven by a virtual millisecond clock at full tempo, so
//! the output depends only on the demo's instructions.

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Duration;

use retrowriter::{DemoDocument, Mode, Snapshot, Writer};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut cols = 40usize;
    let mut rows = 25usize;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--cols" => {
                i += 1;
                if i < args.len() {
                    cols = args[i].parse().unwrap_or(40);
                }
            }
            "-r" | "--rows" => {
                i += 1;
                if i < args.len() {
                    rows = args[i].parse().unwrap_or(25);
                }
            }
            "-f" | "--file" => {
                i += 1;
                if i < args.len() {
                    input_file = Some(args[i].clone());
                }
            }
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            }
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            }
            "-h" | "--help" => {
                show_help = true;
            }
            other => {
                eprintln!("Unknown argument '{other}'");
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    match run(cols, rows, input_file, output_format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    eprintln!(
        r#"retro-headless - Headless RetroWriter demo runner

USAGE:
    retro-headless [OPTIONS]

OPTIONS:
    -h, --help          Show this help message
    -f, --file <FILE>   Demo document to replay (stdin if not specified)
    -c, --cols <N>      Grid columns (default: 40)
    -r, --rows <N>      Grid rows (default: 25)
    -t, --text          Output final grid as plain text (default)
    -j, --json          Output final state as a JSON snapshot

EXAMPLES:
    # Replay a demo and show the resulting text
    retro-headless -f session.json

    # Replay from stdin and emit a full snapshot
    cat session.json | retro-headless --json
"#
    );
}

fn run(
    cols: usize,
    rows: usize,
    input_file: Option<String>,
    output_format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = match input_file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let document: DemoDocument = serde_json::from_str(&input)?;

    let mut writer = Writer::new(cols, rows);
    writer.import_demo(&document)?;

    // Full tempo: one instruction per virtual millisecond
    writer.set_speed(1.0);
    writer.play();

    let mut now = Duration::ZERO;
    let deadline = Duration::from_millis(10 * document.instructions.len() as u64 + 1000);
    while writer.mode() == Mode::Play {
        now += Duration::from_millis(1);
        writer.tick(now)?;
        if now > deadline {
            return Err("playback did not finish within the virtual deadline".into());
        }
    }

    let snapshot = Snapshot::from_writer(&writer);
    match output_format {
        OutputFormat::Text => print!("{}", snapshot.to_text()),
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
    }

    Ok(())
}
