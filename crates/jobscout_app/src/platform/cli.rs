use std::path::PathBuf;

use clap::Parser;
use scout_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "jobscout")]
#[command(about = "Start a job-scraping run and watch offers arrive in the terminal")]
pub struct Cli {
    /// RON config file; missing file means built-in defaults.
    #[arg(long, default_value = "jobscout.ron")]
    pub config: PathBuf,
    /// Backend base URL, overrides the config file.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Log destination (file, terminal or both), overrides the config file.
    #[arg(long)]
    pub log: Option<LogDestination>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["jobscout"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("jobscout.ron"));
        assert_eq!(cli.base_url, None);
        assert_eq!(cli.log, None);
    }

    #[test]
    fn flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "jobscout",
            "--config",
            "/etc/jobscout.ron",
            "--base-url",
            "http://scraper.local:8000/",
            "--log",
            "both",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/jobscout.ron"));
        assert_eq!(cli.base_url.as_deref(), Some("http://scraper.local:8000/"));
        assert_eq!(cli.log, Some(LogDestination::Both));
    }

    #[test]
    fn unknown_log_destination_is_rejected() {
        assert!(Cli::try_parse_from(["jobscout", "--log", "syslog"]).is_err());
    }
}
