use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use keyprobe::{
    FfmpegLogLevel, KeyFrameProbe, KeyFrameReport, LibraryVersions, ProbeError, ScanOptions,
};
use serde_json::{Value, json};

const CLI_AFTER_HELP: &str = "Examples:\n  keyprobe keyframes input.mp4\n  keyprobe keyframes a.mp4 b.webm --json --progress\n  keyprobe keyframes long.mkv --budget 5000 --sorted\n  keyprobe versions --json\n  keyprobe completions zsh > _keyprobe";

#[derive(Debug, Parser)]
#[command(
    name = "keyprobe",
    version,
    about = "Probe keyframe start times of media files",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Print stream diagnostics alongside the timestamps.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar when probing several files.
    #[arg(long)]
    progress: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print keyframe start times of each input's first video stream.
    #[command(
        about = "Print keyframe start times",
        visible_alias = "probe",
        after_help = "Examples:\n  keyprobe keyframes input.mp4\n  keyprobe keyframes input.mkv --json --budget 2000"
    )]
    Keyframes {
        /// Input media paths.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output results as machine-readable JSON.
        #[arg(long)]
        json: bool,

        /// Stop after this many decoded frames per file.
        #[arg(long, default_value_t = keyprobe::DEFAULT_PACKET_BUDGET)]
        budget: usize,

        /// Sort timestamps ascending instead of keeping demux order.
        #[arg(long)]
        sorted: bool,
    },

    /// Print the versions of the linked FFmpeg libraries.
    #[command(about = "Print FFmpeg library versions")]
    Versions {
        /// Output versions as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    #[command(about = "Generate shell completion script")]
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn apply_global_options(global: &GlobalOptions) -> Result<(), Box<dyn std::error::Error>> {
    let level = match &global.log_level {
        Some(value) => FfmpegLogLevel::parse(value)
            .ok_or(format!("unsupported --log-level: {value}"))?,
        None => FfmpegLogLevel::Quiet,
    };
    keyprobe::initialize(level)?;
    Ok(())
}

fn report_json(input: &Path, result: &Result<KeyFrameReport, ProbeError>) -> Value {
    match result {
        Ok(report) => json!({
            "input": input.display().to_string(),
            "start_secs": report.start_times_seconds,
            "stream": {
                "index": report.stream.stream_index,
                "codec": report.stream.codec,
                "time_base": format!(
                    "{}/{}",
                    report.stream.time_base.numerator(),
                    report.stream.time_base.denominator()
                ),
                "avg_frame_rate": format!(
                    "{}/{}",
                    report.stream.average_frame_rate.numerator(),
                    report.stream.average_frame_rate.denominator()
                ),
                "declared_frame_count": report.stream.declared_frame_count,
                "estimated_frame_count": report.stream.estimated_frame_count,
                "frames_decoded": report.stream.frames_decoded,
                "truncated": report.stream.budget_exhausted,
            },
        }),
        Err(error) => json!({
            "input": input.display().to_string(),
            "error": error.to_string(),
        }),
    }
}

fn print_report(input: &Path, report: &KeyFrameReport, verbose: bool) {
    println!(
        "{} {} ({} keyframes)",
        "input".cyan().bold(),
        input.display(),
        report.len()
    );

    if verbose {
        let stream = &report.stream;
        println!(
            "  stream {} codec={} time_base={}/{} avg_frame_rate={}/{}",
            stream.stream_index,
            stream.codec,
            stream.time_base.numerator(),
            stream.time_base.denominator(),
            stream.average_frame_rate.numerator(),
            stream.average_frame_rate.denominator(),
        );
        println!(
            "  frames: declared={} estimated={} decoded={}",
            stream.declared_frame_count, stream.estimated_frame_count, stream.frames_decoded,
        );
    }

    for start in &report.start_times_seconds {
        println!("{start:.6}");
    }

    if report.is_truncated() {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!(
                "scan stopped after {} frames; later keyframes were not probed (raise --budget)",
                report.stream.frames_decoded
            )
            .yellow()
        );
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    apply_global_options(&cli.global)?;

    match cli.command {
        Commands::Keyframes {
            inputs,
            json,
            budget,
            sorted,
        } => {
            let options = ScanOptions::new()
                .with_packet_budget(budget)
                .with_sorted_output(sorted);
            let probe = KeyFrameProbe::new(options);

            let progress_bar = if cli.global.progress && inputs.len() > 1 {
                let bar = ProgressBar::new(inputs.len() as u64);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
                    )?
                    .progress_chars("=>-"),
                );
                Some(bar)
            } else {
                None
            };

            let mut results = Vec::with_capacity(inputs.len());
            for input in &inputs {
                if let Some(bar) = &progress_bar {
                    bar.set_message(input.display().to_string());
                }
                results.push(probe.probe(input));
                if let Some(bar) = &progress_bar {
                    bar.inc(1);
                }
            }
            if let Some(bar) = progress_bar {
                bar.finish_and_clear();
            }

            let failures = results.iter().filter(|result| result.is_err()).count();

            if json {
                let payload: Vec<Value> = inputs
                    .iter()
                    .zip(&results)
                    .map(|(input, result)| report_json(input, result))
                    .collect();
                let payload = if payload.len() == 1 {
                    payload.into_iter().next().unwrap_or(Value::Null)
                } else {
                    Value::Array(payload)
                };
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                for (input, result) in inputs.iter().zip(&results) {
                    match result {
                        Ok(report) => print_report(input, report, cli.global.verbose),
                        Err(error) => eprintln!(
                            "{} {}: {error}",
                            "error:".red().bold(),
                            input.display()
                        ),
                    }
                }
            }

            if failures > 0 {
                return Err(format!("{failures} of {} input(s) failed", inputs.len()).into());
            }
        }
        Commands::Versions { json } => {
            let versions = LibraryVersions::current();
            if json {
                let payload = json!({
                    "avformat": versions.avformat,
                    "avcodec": versions.avcodec,
                    "avutil": versions.avutil,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("libavformat {}", versions.avformat);
                println!("libavcodec  {}", versions.avcodec);
                println!("libavutil   {}", versions.avutil);
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "keyprobe", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn parses_keyframes_defaults() {
        let cli = Cli::parse_from(["keyprobe", "keyframes", "a.mp4"]);
        match cli.command {
            Commands::Keyframes {
                inputs,
                json,
                budget,
                sorted,
            } => {
                assert_eq!(inputs.len(), 1);
                assert!(!json);
                assert_eq!(budget, 1_000);
                assert!(!sorted);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_global_and_batch_flags() {
        let cli = Cli::parse_from([
            "keyprobe",
            "--log-level",
            "error",
            "--progress",
            "probe",
            "a.mp4",
            "b.mkv",
            "--budget",
            "50",
            "--sorted",
            "--json",
        ]);
        assert_eq!(cli.global.log_level.as_deref(), Some("error"));
        assert!(cli.global.progress);
        match cli.command {
            Commands::Keyframes {
                inputs,
                json,
                budget,
                sorted,
            } => {
                assert_eq!(inputs.len(), 2);
                assert!(json);
                assert_eq!(budget, 50);
                assert!(sorted);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn keyframes_requires_an_input() {
        assert!(Cli::try_parse_from(["keyprobe", "keyframes"]).is_err());
    }
}
