//! The `parse`, `check` and `rules` commands.
//!
//! Each command writes to a caller-supplied sink so it can be exercised
//! without a terminal.

use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use oxide_obsql_core::{
    AstBuilder, AstForest, Diagnostic, Dialect, Parser, ReductionTable, RuleKind,
};

use crate::error::CliError;

/// How `parse` renders the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Rust debug notation.
    Debug,
}

/// Options shared by `parse` and `check`.
pub struct BuildOptions<'a> {
    pub dialect: &'a dyn Dialect,
    pub parallel: bool,
}

/// Reads `path`, or all of `stdin` when no path is given.
pub fn read_input(path: Option<&Path>, stdin: impl Read) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(std::io::read_to_string(stdin)?),
    }
}

fn build(sql: &str, options: &BuildOptions<'_>) -> Result<AstForest, CliError> {
    let root = Parser::with_dialect(sql, options.dialect).parse()?;
    debug!(dialect = options.dialect.name(), bytes = sql.len(), "parsed input");
    let forest = AstBuilder::new().parallel(options.parallel).build(&root)?;
    info!(
        statements = forest.statements.len(),
        diagnostics = forest.diagnostics.len(),
        "reduced input"
    );
    Ok(forest)
}

/// Prints the forest and its diagnostics.
pub fn parse(
    sql: &str,
    options: &BuildOptions<'_>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let forest = build(sql, options)?;
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &forest)?;
            writeln!(out)?;
        }
        OutputFormat::Debug => writeln!(out, "{forest:#?}")?,
    }
    Ok(())
}

/// Line and column (both one-based) of a byte offset.
fn position(sql: &str, offset: usize) -> (usize, usize) {
    let before = sql.get(..offset).unwrap_or(sql);
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |i| before.len() - i - 1) + 1;
    (line, column)
}

fn render(sql: &str, diagnostic: &Diagnostic) -> String {
    let (line, column) = position(sql, diagnostic.span.start);
    format!("{line}:{column}: {diagnostic}")
}

/// Prints one diagnostic per line. Returns true when the input is clean of
/// errors; warnings alone still pass.
pub fn check(
    sql: &str,
    options: &BuildOptions<'_>,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let forest = build(sql, options)?;
    for diagnostic in &forest.diagnostics {
        writeln!(out, "{}", render(sql, diagnostic))?;
    }
    Ok(!forest.has_errors())
}

#[derive(Serialize)]
struct RuleLine {
    rule: &'static str,
    custom: bool,
}

/// Lists rule kinds with their reduction: custom or identity.
pub fn rules(
    custom_only: bool,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let table = ReductionTable::standard();
    let lines: Vec<RuleLine> = RuleKind::ALL
        .iter()
        .map(|kind| RuleLine {
            rule: kind.name(),
            custom: table.is_custom(*kind),
        })
        .filter(|line| line.custom || !custom_only)
        .collect();
    debug!(total = lines.len(), "listed rules");
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &lines)?;
            writeln!(out)?;
        }
        OutputFormat::Debug => {
            for line in &lines {
                let how = if line.custom { "custom" } else { "identity" };
                writeln!(out, "{}\t{how}", line.rule)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_obsql_core::{MySqlDialect, OracleDialect};

    const MYSQL: BuildOptions<'static> = BuildOptions {
        dialect: &MySqlDialect,
        parallel: false,
    };

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<(), CliError>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_parse_json() {
        let text = output(|out| parse("SELECT 1; COMMIT", &MYSQL, OutputFormat::Json, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["statements"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_parse_debug() {
        let text = output(|out| parse("COMMIT", &MYSQL, OutputFormat::Debug, out));
        assert!(text.contains("Commit"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let mut out = Vec::new();
        let err = parse("SELEC 1", &MYSQL, OutputFormat::Json, &mut out).unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[test]
    fn test_check() {
        let mut out = Vec::new();
        let clean = check("SELECT a FROM t", &MYSQL, &mut out).unwrap();
        assert!(clean);
        assert!(out.is_empty());

        let mut out = Vec::new();
        let clean = check("SELECT 1;\nCREATE TABLE t (a INT) CHARSET a CHARSET b", &MYSQL, &mut out)
            .unwrap();
        assert!(clean, "warnings do not fail a check");
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("2:"), "{text}");
        assert!(text.contains("AmbiguousOption"));

        let mut out = Vec::new();
        let clean = check("CREATE TABLE t", &MYSQL, &mut out).unwrap();
        assert!(!clean);
    }

    #[test]
    fn test_check_with_oracle_and_parallel() {
        let options = BuildOptions {
            dialect: &OracleDialect,
            parallel: true,
        };
        let mut out = Vec::new();
        assert!(check("SELECT a || b FROM t; SELECT 1", &options, &mut out).unwrap());
    }

    #[test]
    fn test_rules() {
        let all = output(|out| rules(false, OutputFormat::Debug, out));
        let custom = output(|out| rules(true, OutputFormat::Debug, out));
        assert_eq!(all.lines().count(), RuleKind::COUNT);
        assert!(custom.lines().count() < all.lines().count());
        assert!(custom.lines().all(|l| l.ends_with("\tcustom")));
        assert!(all.contains("stmt_list\tidentity"));

        let json = output(|out| rules(true, OutputFormat::Json, out));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value.as_array().map(Vec::len),
            Some(custom.lines().count())
        );
        assert_eq!(value[0]["custom"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_position() {
        assert_eq!(position("ab\ncd", 0), (1, 1));
        assert_eq!(position("ab\ncd", 4), (2, 2));
    }
}
