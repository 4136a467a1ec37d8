//! CLI entry point.
//!
//! # Responsibility
//! - Normalize bullet and experience documents from the shell.
//! - Replay recorded scenarios against a real coordinator.
//! - Keep output deterministic and machine-readable (JSON).

mod scenario;

use clap::{Parser, Subcommand};
use log::{error, info};
use navsync_core::{
    core_version, init_logging, normalize, ConfigError, ExperienceEntry, ExperienceTimeline,
    LoggingConfig, NavConfig, TimelineConfig,
};
use scenario::Scenario;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "navsync", version, about = "Navigation sync and content tools")]
struct Cli {
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    /// Absolute directory for rolling log files (stderr when omitted).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize a JSON array of bullet strings.
    Normalize {
        path: PathBuf,
        /// Treat the input as an array of experience entries.
        #[arg(long)]
        entries: bool,
        /// NavConfig JSON file; its `timeline` caps the visible bullets.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Replay a JSON scenario and print every published change.
    Replay {
        scenario: PathBuf,
        /// NavConfig JSON file; built-in portfolio defaults when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the core version.
    Version,
}

#[derive(Debug)]
enum CliError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Config(ConfigError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("navsync: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(output) => {
            for line in output {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error message={err}");
            eprintln!("navsync: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<Vec<String>, CliError> {
    match command {
        Command::Normalize {
            path,
            entries,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let raw = read_file(&path)?;
            Ok(vec![normalize_document(&raw, entries, &config.timeline)?])
        }
        Command::Replay { scenario, config } => {
            let config = load_config(config.as_deref())?;
            let raw = read_file(&scenario)?;
            replay_document(&config, &raw)
        }
        Command::Version => Ok(vec![format!("navsync_core version={}", core_version())]),
    }
}

fn load_config(path: Option<&Path>) -> Result<NavConfig, CliError> {
    match path {
        Some(path) => Ok(NavConfig::from_path(path)?),
        None => Ok(NavConfig::default()),
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Normalized entry plus its collapsed timeline counts.
#[derive(Debug, Serialize)]
struct EntrySummary<'a> {
    #[serde(flatten)]
    entry: &'a ExperienceEntry,
    visible: usize,
    hidden: usize,
}

/// Pretty JSON of the normalized document.
fn normalize_document(
    raw: &str,
    entries: bool,
    timeline: &TimelineConfig,
) -> Result<String, CliError> {
    if entries {
        // Entries normalize their bullets while deserializing.
        let parsed: Vec<ExperienceEntry> = serde_json::from_str(raw)?;
        let timeline = ExperienceTimeline::from_config(parsed, timeline);
        let summaries: Vec<EntrySummary<'_>> = timeline
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| EntrySummary {
                entry,
                visible: timeline.visible_bullets(index).len(),
                hidden: timeline.hidden_count(index),
            })
            .collect();
        info!(
            "event=cli_normalize module=cli status=ok kind=entries count={} max_bullets={}",
            summaries.len(),
            timeline.max_bullets()
        );
        return Ok(serde_json::to_string_pretty(&summaries)?);
    }
    let bullets: Vec<String> = serde_json::from_str(raw)?;
    let normalized = normalize(&bullets);
    info!(
        "event=cli_normalize module=cli status=ok kind=bullets input={} output={}",
        bullets.len(),
        normalized.len()
    );
    Ok(serde_json::to_string_pretty(&normalized)?)
}

/// One JSON line per published change.
fn replay_document(config: &NavConfig, raw: &str) -> Result<Vec<String>, CliError> {
    let parsed: Scenario = serde_json::from_str(raw)?;
    let records = scenario::replay(config, &parsed);
    info!(
        "event=cli_replay module=cli status=ok steps={} records={}",
        parsed.steps.len(),
        records.len()
    );
    records
        .iter()
        .map(|record| serde_json::to_string(record).map_err(CliError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_document, replay_document, run, CliError, Command};
    use navsync_core::{NavConfig, TimelineConfig};
    use std::io::Write;

    fn timeline() -> TimelineConfig {
        TimelineConfig::default()
    }

    #[test]
    fn normalize_document_collapses_and_dedups() {
        let output = normalize_document(r#"["  a  b ", "a b", "xx", ""]"#, false, &timeline())
            .expect("bullets normalize");
        let parsed: Vec<String> = serde_json::from_str(&output).expect("output is JSON");
        assert_eq!(parsed, vec!["a b".to_string(), "x".to_string(), String::new()]);
    }

    #[test]
    fn normalize_document_handles_entries() {
        let raw = r#"[{"role": "Engineer", "company": "Acme", "period": "2020",
                       "bullets": ["Shipped it.Shipped it.", "Shipped it."]}]"#;
        let output = normalize_document(raw, true, &timeline()).expect("entries normalize");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("output is JSON");
        assert_eq!(parsed[0]["bullets"], serde_json::json!(["Shipped it."]));
        assert_eq!(parsed[0]["role"], "Engineer");
        assert_eq!(parsed[0]["visible"], 1);
        assert_eq!(parsed[0]["hidden"], 0);
    }

    #[test]
    fn normalize_document_rejects_wrong_shape() {
        let error = normalize_document(r#"{"not": "an array"}"#, false, &timeline())
            .expect_err("object input must fail");
        assert!(matches!(error, CliError::Json(_)));
    }

    #[test]
    fn replay_document_emits_json_lines() {
        let raw = r#"{
            "viewport": {"scroll_height": 2000, "client_height": 1000},
            "container": {"left": 0, "top": 0, "width": 500, "height": 40},
            "buttons": {"home": {"left": 5, "top": 4, "width": 40, "height": 30}},
            "steps": [{"type": "scroll", "scroll_top": 250}]
        }"#;
        let lines = replay_document(&NavConfig::default(), raw).expect("replay succeeds");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""kind":"indicator""#));
        assert!(lines[1].contains(r#""scroll_progress":25.0"#));
    }

    #[test]
    fn run_reports_missing_files() {
        let error = run(Command::Normalize {
            path: "/definitely/not/here.json".into(),
            entries: false,
            config: None,
        })
        .expect_err("missing file must fail");
        assert!(matches!(error, CliError::Io { .. }));
    }

    #[test]
    fn run_normalizes_entries_with_configured_cap() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("nav.json");
        let entries_path = dir.path().join("entries.json");
        std::fs::write(&config_path, r#"{"timeline": {"max_bullets": 2}}"#)
            .expect("write config");
        std::fs::write(
            &entries_path,
            r#"[{"role": "R", "company": "C", "period": "P",
                 "bullets": ["one", "two", "three", "two"]}]"#,
        )
        .expect("write entries");

        let lines = run(Command::Normalize {
            path: entries_path,
            entries: true,
            config: Some(config_path),
        })
        .expect("normalize succeeds");
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).expect("output is JSON");
        assert_eq!(parsed[0]["bullets"], serde_json::json!(["one", "two", "three"]));
        assert_eq!(parsed[0]["visible"], 2);
        assert_eq!(parsed[0]["hidden"], 1);
    }

    #[test]
    fn run_replays_with_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("nav.json");
        let scenario_path = dir.path().join("scenario.json");
        std::fs::File::create(&config_path)
            .and_then(|mut file| {
                file.write_all(br#"{"items": [{"id": "intro", "label": "Intro"}]}"#)
            })
            .expect("write config");
        std::fs::write(
            &scenario_path,
            r#"{"viewport": {"scroll_height": 1000, "client_height": 1000},
                "steps": [{"type": "navigate", "id": "intro"}]}"#,
        )
        .expect("write scenario");

        let lines = run(Command::Replay {
            scenario: scenario_path,
            config: Some(config_path),
        })
        .expect("replay succeeds");
        assert_eq!(
            lines,
            vec![r#"{"kind":"scroll_into_view","step":1,"section_id":"intro"}"#.to_string()]
        );
    }
}
