//! Convert a model between file formats.
//!
//! Usage:
//!   cargo run --release --bin zoxel_convert -- model.csv model.zox
//!   cargo run --release --bin zoxel_convert -- in.dat out.zox --from sproxel --config editor.json
//!
//! Formats are chosen by extension unless `--from` / `--to` name a codec.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use zoxel::core::config::SessionConfig;
use zoxel::core::logging;
use zoxel::core::types::Result;
use zoxel::session::EditorSession;

const USAGE: &str =
    "Usage: zoxel_convert <input> <output> [--from <codec>] [--to <codec>] [--config <path>]";

struct Args {
    input: PathBuf,
    output: PathBuf,
    from: Option<String>,
    to: Option<String>,
    config: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let option = |name: &str| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    // Positionals are whatever is not a flag or a flag's value
    let mut positional = Vec::new();
    let mut skip = false;
    for arg in args.iter().skip(1) {
        if skip {
            skip = false;
        } else if arg.starts_with("--") {
            skip = true;
        } else {
            positional.push(PathBuf::from(arg));
        }
    }
    let [input, output] = <[PathBuf; 2]>::try_from(positional).ok()?;

    Some(Args {
        input,
        output,
        from: option("--from"),
        to: option("--to"),
        config: option("--config").map(PathBuf::from),
    })
}

fn convert(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => SessionConfig::load_sync(path)?,
        None => SessionConfig::default(),
    };
    let mut session = EditorSession::new(config)?;

    load(&mut session, &args.input, args.from.as_deref())?;
    log::info!(
        "Read {} voxels in a {} grid",
        session.grid().len(),
        session.grid().extent()
    );

    match args.to.as_deref() {
        Some(codec) => session.save(&args.output, codec),
        None => session.save_path(&args.output),
    }
}

fn load(session: &mut EditorSession, path: &Path, codec: Option<&str>) -> Result<()> {
    match codec {
        Some(codec) => session.load(path, codec),
        None => session.load_path(path),
    }
}

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    match convert(&args) {
        Ok(()) => {
            println!("Wrote {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("zoxel_convert: {}", e);
            ExitCode::FAILURE
        }
    }
}
