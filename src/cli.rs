//! CLI argument definitions using clap derive macros.

use clap::Parser;
use harvester::downloader::{
    RetryPolicy, DEFAULT_DIRECTORY, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY,
    DEFAULT_RETRY_ROUND_DELAY,
};
use harvester::Category;
use std::path::PathBuf;
use std::time::Duration;

/// Download every ZIP, PDF, image, MP4 or MP3 linked from a web page.
///
/// Failed downloads are retried inline, then again in retry rounds once every
/// other file has been tried.
#[derive(Parser, Debug)]
#[command(name = "harvester")]
#[command(author, version, about)]
pub struct Args {
    /// Page to scan; `https://` is assumed when no scheme is given
    pub url: String,

    /// Resource kind: zip, pdf, img, mp4, mp3 (or 1-5)
    #[arg(short = 't', long = "type", env = "HARVESTER_CATEGORY")]
    pub category: Category,

    /// Directory the files are saved to
    #[arg(short, long, env = "HARVESTER_OUTPUT_DIR", default_value = DEFAULT_DIRECTORY)]
    pub output: PathBuf,

    /// Inline retries per file, also the number of retry rounds (0-10)
    #[arg(short = 'r', long, env = "HARVESTER_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub max_retries: u32,

    /// Wait between two attempts of the same file, in milliseconds
    #[arg(long, env = "HARVESTER_RETRY_DELAY_MS", default_value_t = DEFAULT_RETRY_DELAY.as_millis() as u64)]
    pub retry_delay_ms: u64,

    /// Wait between two retry rounds, in milliseconds
    #[arg(long, env = "HARVESTER_RETRY_ROUND_DELAY_MS", default_value_t = DEFAULT_RETRY_ROUND_DELAY.as_millis() as u64)]
    pub retry_round_delay_ms: u64,

    /// User agent sent with every request
    #[arg(long, env = "HARVESTER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Retry policy described by the flags.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.retry_delay_ms),
            Duration::from_millis(self.retry_round_delay_ms),
        )
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["harvester", "example.com", "-t", "pdf"]).unwrap();
        assert_eq!(args.url, "example.com");
        assert_eq!(args.category, Category::Pdf);
        assert_eq!(args.output, PathBuf::from("downloads"));
        assert_eq!(args.retry_policy(), RetryPolicy::default());
        assert_eq!(args.log_level(), "warn");
        assert!(!args.no_progress);
    }

    #[test]
    fn test_cli_menu_number_category() {
        let args = Args::try_parse_from(["harvester", "example.com", "--type", "3"]).unwrap();
        assert_eq!(args.category, Category::Image);
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        let result = Args::try_parse_from(["harvester", "example.com", "-t", "exe"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_retry_flags() {
        let args = Args::try_parse_from([
            "harvester",
            "example.com",
            "-t",
            "zip",
            "-r",
            "5",
            "--retry-delay-ms",
            "10",
            "--retry-round-delay-ms",
            "20",
        ])
        .unwrap();
        let policy = args.retry_policy();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.retry_delay, Duration::from_millis(10));
        assert_eq!(policy.retry_round_delay, Duration::from_millis(20));
    }

    #[test]
    fn test_cli_max_retries_range() {
        let result = Args::try_parse_from(["harvester", "example.com", "-t", "zip", "-r", "11"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_log_levels() {
        let args = Args::try_parse_from(["harvester", "x.org", "-t", "mp3", "-vv"]).unwrap();
        assert_eq!(args.log_level(), "trace");
        let args = Args::try_parse_from(["harvester", "x.org", "-t", "mp3", "-q"]).unwrap();
        assert_eq!(args.log_level(), "error");
    }
}
