use anyhow::Result;
use clap::Parser;
use rockbox_scrobbler::scrobble::{
    handle_file, DryRunScrobbler, FileDisposition, JsonLinesScrobbler, ScrobbleSummary,
};
use rockbox_scrobbler::scrobbler_log::TimeOffset;
use rockbox_scrobbler::{ScrobbleConfig, ScrobblePipeline};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "rockbox-scrobbler", version)]
#[command(about = "Submit .scrobbler.log files to a scrobbling service", long_about = None)]
struct Args {
    /// File path to your .scrobbler.log
    #[arg(short = 'f', long)]
    file: String,

    /// Offset of local time to UTC (e.g. "0h", "+1h", "-5h30m"; bare numbers are hours)
    #[arg(short = 'o', long, default_value = "0h", allow_hyphen_values = true)]
    offset: String,

    /// Handle the log without prompting (omit to be asked)
    #[arg(short = 'n', long, value_enum)]
    non_interactive: Option<FileDisposition>,

    /// Stop at the first malformed entry
    #[arg(long)]
    strict: bool,

    /// Print accepted listens as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let offset: TimeOffset = args.offset.parse()?;

    // Expand ~ in paths
    let log_path = PathBuf::from(shellexpand::tilde(&args.file).as_ref());

    let config = ScrobbleConfig::new(log_path)
        .with_offset(offset)
        .with_disposition(args.non_interactive.unwrap_or_default())
        .with_strict(args.strict);

    let summary = if args.json {
        let scrobbler = JsonLinesScrobbler::new(io::stdout().lock());
        let mut pipeline = ScrobblePipeline::new(config.clone(), scrobbler);
        pipeline.run()?
    } else {
        let mut pipeline = ScrobblePipeline::new(config.clone(), DryRunScrobbler::new());
        pipeline.run()?
    };

    report(&summary);

    // Prompts go to stderr so JSON output on stdout stays clean
    let exit_code = handle_file(
        &config.log_path,
        config.disposition,
        summary.failures(),
        &mut io::stdin().lock(),
        &mut io::stderr(),
    )?;

    Ok(ExitCode::from(exit_code as u8))
}

fn report(summary: &ScrobbleSummary) {
    log::info!("Submitted: {}", summary.submitted);
    if summary.skipped > 0 {
        log::info!("Skipped (not listened): {}", summary.skipped);
    }
    if summary.failures() > 0 {
        log::warn!(
            "Failures: {} ({} invalid entries, {} rejected)",
            summary.failures(),
            summary.invalid,
            summary.failed
        );
    }
}
