//! Output management and formatting.

use std::io::{self, IsTerminal};

use chrono::{SecondsFormat, Utc};
use console::Term;
use owo_colors::OwoColorize;
use serde_json::json;

use mortise_core::prelude::{FileChange, ScaffoldReport};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on flags and configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    verbose: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `--output-format` beats `output.format`; `Auto` resolves to `Human`
    /// on a terminal and `Plain` otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = args
            .output_format
            .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));

        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            verbose: args.verbose > 0,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON modes.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Write a JSON document to stdout regardless of `--quiet`.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Print what a run created and patched.
    pub fn report(&self, command: &str, report: &ScaffoldReport) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(&report_json(command, report));
        }

        for change in report.changes() {
            self.print(&change_line(change))?;
        }
        for (path, markers) in report.warnings() {
            for marker in markers {
                self.warning(&format!(
                    "marker '{marker}' not found in {}; nothing inserted",
                    path.display()
                ))?;
            }
        }
        self.success(&summary(report))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if `-v` was passed at least once.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn suppressed(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }
}

/// The machine-readable run report.
pub fn report_json(command: &str, report: &ScaffoldReport) -> serde_json::Value {
    json!({
        "status": "ok",
        "command": command,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "created": report.created().count(),
        "patched": report.patched().count(),
        "changes": report.changes(),
    })
}

fn change_line(change: &FileChange) -> String {
    match change {
        FileChange::Created { path } => format!("  created  {}", path.display()),
        FileChange::Patched { path, inserted, .. } => {
            format!("  patched  {} (+{inserted})", path.display())
        }
    }
}

fn summary(report: &ScaffoldReport) -> String {
    format!(
        "{} files created, {} files patched",
        report.created().count(),
        report.patched().count()
    )
}

// ── tests ─────────────────────────────────────────────────────────────────────
