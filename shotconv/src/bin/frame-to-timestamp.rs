use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use clap::Parser;
use color_eyre::eyre::{self, Context};
use keyframe_common::{
    bin_common::init::{init_eyre, init_logger},
    utils::fsutils::read_optional_file,
};
use shotconv::{
    dispatch::{self, Mode},
    timestamp::FrameRate,
    Options,
};

#[derive(Parser, Debug)]
#[command()]
/// Convert frame numbers and clock times in shot boundary files and keyframe filenames
/// into `HH_MM_SS.sss` timestamps.
///
/// With neither a path nor `--folder`, `shot_boundaries/` and `keyframes/` in the current
/// directory are processed.
struct Cli {
    /// A shot boundary file, a directory of them, or a directory of keyframes
    input_path: Option<PathBuf>,

    /// Only process shot boundaries
    #[arg(long, short = 's')]
    shots: bool,

    /// Only process keyframes
    #[arg(long, short = 'k')]
    keyframes: bool,

    /// Folder containing `shot_boundaries` and `keyframes` directories
    #[arg(long, short = 'f')]
    folder: Option<PathBuf>,

    /// Rename converted keyframes to `<prefix>_Scene-<n>.jpg`, ordered by time
    #[arg(long, short = 'r')]
    rename: bool,

    /// Frames per second used to turn frame numbers into time
    #[arg(long, default_value_t = FrameRate::DEFAULT)]
    frame_rate: FrameRate,

    /// Fail on lines that look like a range but can't be parsed
    #[arg(long)]
    strict: bool,

    /// A file to additionally write the logs to
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Also print debug logs
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn cli_arguments() -> eyre::Result<Cli> {
    const ARGS_FILE: &str = ".frametimerc";
    let mut args: Vec<OsString> = std::env::args_os().collect();

    if args.len() == 1 {
        if let Some(flags) = read_optional_file(ARGS_FILE)
            .wrap_err_with(|| format!("Could not read config file at: {ARGS_FILE}"))?
        {
            args.extend(flags.split_whitespace().map(OsString::from));
        }
    }

    Ok(Cli::parse_from(args))
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    let cli = cli_arguments()?;
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    init_logger(cli.logfile.as_deref(), level)?;

    log::debug!("CLI arguments: {cli:#?}");

    let opts = Options {
        frame_rate: cli.frame_rate,
        strict: cli.strict,
    };
    let mode = Mode::from_flags(cli.shots, cli.keyframes);

    let summary = if let Some(folder) = &cli.folder {
        dispatch::process_folder(folder, cli.rename, &opts)
            .wrap_err_with(|| format!("failed to process folder: {}", folder.display()))?
    } else if let Some(input) = &cli.input_path {
        dispatch::process_path(input, mode, cli.rename, &opts)
            .wrap_err_with(|| format!("failed to process: {}", input.display()))?
    } else {
        log::info!("No path given, using the current directory");
        dispatch::process_layout(Path::new("."), cli.rename, &opts)
            .wrap_err("failed to process the current directory")?
    };

    log::info!("Done: {summary}");
    Ok(())
}
