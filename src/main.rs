//! mp3tag CLI
//!
//! # What this program is
//! A small command-line tool that walks `.mp3` files and fixes up their ID3 tags:
//!
//! - `info`  print every frame (legacy text shown through GBK/BIG5)
//! - `conv`  upgrade legacy GBK/BIG5 text frames to Unicode
//! - `cover` attach a cover image (local file or http/https URL)
//! - `fname` derive track number and title from "03. Title.mp3" style names
//! - `serve` run the local web front-end
//!
//! Old-style invocations keep working: `mp3tag INFO -big5 dir/` is the same as
//! `mp3tag info --big5 dir/`.
//!
//! Progress goes to stdout; diagnostics go through `tracing` to stderr
//! (`RUST_LOG=mp3tag=debug` for the details).

use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mp3tag::core::actions::{self, BatchReport};
use mp3tag::core::filename::FilenamePattern;
use mp3tag::core::library::expand_home;
use mp3tag::core::types::TagVersion;
use mp3tag::core::{Charset, Id3Store, Settings};
use mp3tag::web::{self, AppState};

const VERBS: [&str; 5] = ["info", "conv", "cover", "fname", "serve"];

#[derive(Parser)]
#[command(name = "mp3tag", version)]
#[command(about = "Inspect and rewrite ID3 tags on MP3 files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every ID3 frame
    Info {
        #[command(flatten)]
        tag: TagArgs,
        /// MP3 files or directories
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Convert legacy (GBK/BIG5) text frames to Unicode
    Conv {
        #[command(flatten)]
        tag: TagArgs,
        /// MP3 files or directories
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Attach a cover image to every song
    Cover {
        #[command(flatten)]
        tag: TagArgs,
        /// MP3 files or directories, followed by the cover image path or URL
        #[arg(required = true, num_args = 2.., value_name = "PATHS... COVER")]
        args: Vec<String>,
    },
    /// Set track number and title from the filename
    Fname {
        #[command(flatten)]
        tag: TagArgs,
        /// Characters accepted between the track number and the title (whitespace always is)
        #[arg(long = "separators", value_name = "CHARS", default_value = ".|")]
        pattern: FilenamePattern,
        /// MP3 files or directories
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Run the local web front-end
    Serve {
        #[command(flatten)]
        tag: TagArgs,
        /// Address to listen on
        #[arg(long, env = "MP3TAG_ADDR", default_value = "127.0.0.1:4567")]
        addr: SocketAddr,
        /// Directory shown at /dir/ (defaults to $HOME)
        #[arg(long)]
        root: Option<String>,
    },
}

#[derive(Args)]
struct TagArgs {
    /// Legacy frames are BIG5 (shorthand for --charset big5)
    #[arg(long)]
    big5: bool,
    /// Charset of legacy (Latin-1 marked) frames: gbk, big5 or latin1 [default: gbk]
    #[arg(long, env = "MP3TAG_CHARSET", value_parser = Charset::parse_legacy)]
    charset: Option<Charset>,
    /// Write ID3v2.4 instead of ID3v2.3
    #[arg(long)]
    v24: bool,
}

impl TagArgs {
    fn settings(&self) -> Settings {
        let legacy = if self.big5 {
            Charset::Big5
        } else {
            self.charset.unwrap_or(Charset::Gbk)
        };

        Settings {
            legacy,
            version: if self.v24 {
                TagVersion::Id3v24
            } else {
                TagVersion::Id3v23
            },
            ..Settings::default()
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse_from(normalize_args(std::env::args()));

    let default_filter = match cli.command {
        Commands::Serve { .. } => "mp3tag=info,tower_http=info",
        _ => "mp3tag=warn",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let store = Id3Store;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = match cli.command {
        Commands::Info { tag, paths } => {
            actions::info(&store, &to_paths(&paths), &tag.settings(), &mut out)?
        }
        Commands::Conv { tag, paths } => {
            actions::convert(&store, &to_paths(&paths), &tag.settings(), &mut out)?
        }
        Commands::Cover { tag, args } => {
            // clap guarantees at least two values
            let Some((cover, paths)) = args.split_last() else {
                anyhow::bail!("cover needs at least one path and a cover image");
            };
            actions::attach_cover(&store, &to_paths(paths), cover, &tag.settings(), &mut out)?
        }
        Commands::Fname {
            tag,
            pattern,
            paths,
        } => {
            let settings = Settings {
                pattern,
                ..tag.settings()
            };
            actions::derive_from_filename(&store, &to_paths(&paths), &settings, &mut out)?
        }
        Commands::Serve { tag, addr, root } => {
            drop(out);
            let home = root
                .map(|r| expand_home(&r))
                .unwrap_or_else(|| expand_home("~"));
            let state = AppState::new(Arc::new(Id3Store), home, tag.settings().legacy);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(web::serve(addr, state))?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    out.flush()?;
    tracing::debug!(?report, "batch finished");
    Ok(exit_code(&report))
}

fn exit_code(report: &BatchReport) -> ExitCode {
    if report.aborted {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn to_paths(raw: &[String]) -> Vec<PathBuf> {
    raw.iter().map(|p| expand_home(p)).collect()
}

/// Accept the old spellings: any-case verbs and the single-dash `-big5` flag.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        let arg = if i == 1 && VERBS.iter().any(|v| v.eq_ignore_ascii_case(&arg)) {
            arg.to_ascii_lowercase()
        } else if arg == "-big5" {
            "--big5".to_string()
        } else {
            arg
        };
        out.push(arg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> Vec<String> {
        s.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn old_style_args_are_normalized() {
        assert_eq!(
            normalize_args(args(&["mp3tag", "INFO", "-big5", "a.mp3"])),
            args(&["mp3tag", "info", "--big5", "a.mp3"])
        );
    }

    #[test]
    fn paths_named_like_verbs_are_left_alone() {
        assert_eq!(
            normalize_args(args(&["mp3tag", "info", "INFO"])),
            args(&["mp3tag", "info", "INFO"])
        );
    }

    #[test]
    fn big5_flag_wins_over_charset() {
        let cli = Cli::parse_from(args(&["mp3tag", "conv", "--big5", "--charset", "gbk", "a.mp3"]));
        let Commands::Conv { tag, .. } = cli.command else {
            panic!("expected conv");
        };
        assert_eq!(tag.settings().legacy, Charset::Big5);
    }

    #[test]
    fn charset_must_be_a_legacy_one() {
        let cli = Cli::try_parse_from(args(&["mp3tag", "info", "--charset", "big5", "a.mp3"]));
        let Ok(Cli { command: Commands::Info { tag, .. } }) = cli else {
            panic!("expected info");
        };
        assert_eq!(tag.settings().legacy, Charset::Big5);

        assert!(Cli::try_parse_from(args(&["mp3tag", "info", "--charset", "utf-16", "a.mp3"])).is_err());
    }

    #[test]
    fn separators_build_the_filename_pattern() {
        let cli = Cli::parse_from(args(&["mp3tag", "fname", "--separators", "-", "a.mp3"]));
        let Commands::Fname { pattern, .. } = cli.command else {
            panic!("expected fname");
        };
        assert_eq!(pattern, FilenamePattern::with_separators(['-']));
        assert_eq!(pattern.parse("07-Intro").unwrap().title, "Intro");
        assert!(pattern.parse("07.Intro").unwrap().title.starts_with('.'));
    }

    #[test]
    fn cover_takes_paths_then_image() {
        let cli = Cli::parse_from(args(&["mp3tag", "cover", "a.mp3", "b/", "front.jpg"]));
        let Commands::Cover { args: rest, .. } = cli.command else {
            panic!("expected cover");
        };
        let (cover, paths) = rest.split_last().unwrap();
        assert_eq!(cover, "front.jpg");
        assert_eq!(paths, ["a.mp3", "b/"]);
    }

    #[test]
    fn cover_without_image_is_a_usage_error() {
        assert!(Cli::try_parse_from(args(&["mp3tag", "cover", "a.mp3"])).is_err());
    }

    #[test]
    fn unknown_verb_is_a_usage_error() {
        assert!(Cli::try_parse_from(args(&["mp3tag", "rename", "a.mp3"])).is_err());
    }
}
