//! Terminal and JSON rendering for taskboard commands.
//!
//! Each command builds a [`Report`] for people and a serializable payload for
//! scripts; [`Output`] decides which of the two reaches stdout.

use serde::Serialize;

use crate::error::{exit_codes, Error, Result};

pub const SCHEMA_VERSION: &str = "taskboard.v1";

/// Human view of one command's result.
///
/// ```text
/// taskboard show: Design Landing Page
///   id        a1b2c3d4
///   priority  High
///
/// Finalize the landing page design ...
/// warning: change kept in memory but not saved: ...
/// hint: taskboard board
/// ```
#[derive(Debug, Clone, Default)]
pub struct Report {
    title: String,
    fields: Vec<(String, String)>,
    body: Vec<String>,
    warnings: Vec<String>,
    hints: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// A `key  value` row under the title.
    pub fn field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// A free-form line printed as is, e.g. a rendered column.
    pub fn line(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// A command worth running next.
    pub fn hint(&mut self, command: impl Into<String>) {
        self.hints.push(command.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn render(&self) -> String {
        let mut out = vec![self.title.clone()];

        let width = self.fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in &self.fields {
            out.push(format!("  {key:<width$}  {value}"));
        }
        if !self.body.is_empty() {
            out.push(String::new());
            out.extend(self.body.iter().cloned());
        }
        out.extend(self.warnings.iter().map(|w| format!("warning: {w}")));
        out.extend(self.hints.iter().map(|h| format!("hint: {h}")));

        out.join("\n")
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

/// Global output flags of one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    /// Print a successful result. `--quiet` still lets warnings through on
    /// stderr, since they mean the board was not saved.
    pub fn success<T: Serialize>(self, command: &str, data: &T, report: &Report) -> Result<()> {
        if self.json {
            let envelope = Envelope {
                schema_version: SCHEMA_VERSION,
                command,
                status: "success",
                data: Some(data),
                error: None,
                warnings: report.warnings().to_vec(),
            };
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        } else if self.quiet {
            for warning in report.warnings() {
                eprintln!("warning: {warning}");
            }
        } else {
            println!("{}", report.render());
        }
        Ok(())
    }
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let hint = error_hint(err);
    if json {
        let envelope = Envelope::<()> {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            data: None,
            error: Some(ErrorBody {
                message: err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
                details: err.details(),
                hint,
            }),
            warnings: Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// First positional argument, read before clap so parse errors still name
/// the command.
pub fn infer_command_name_from_args() -> String {
    command_name_from(std::env::args().skip(1))
}

fn command_name_from(mut args: impl Iterator<Item = String>) -> String {
    while let Some(arg) = args.next() {
        if arg == "--data-dir" {
            args.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return arg;
    }
    "taskboard".to_string()
}

fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::Validation(_) => "validation",
        Error::TaskNotFound(_) | Error::ColumnNotFound(_) => "not_found",
        _ if err.exit_code() == exit_codes::USER_ERROR => "user_error",
        _ => "operation_failed",
    }
}

fn error_hint(err: &Error) -> Option<String> {
    let hint = match err {
        Error::TaskNotFound(_) => "taskboard board",
        Error::ColumnNotFound(_) => "use one of: todo, inProgress, completed",
        Error::Validation(err) if err.message_for("assignee").is_some() => "taskboard people",
        Error::InvalidConfig(_) => "fix taskboard.toml then retry",
        Error::LockFailed(_) => "retry once the other taskboard process exits",
        _ => return None,
    };
    Some(hint.to_string())
}
