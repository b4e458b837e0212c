//! Presentation: tab-separated table and JSON-lines output.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Serialize, Serializer};

use crate::backend::Target;
use crate::model::Statement;
use crate::pipeline::CompiledLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// One tab-separated row per statement, with a header.
    #[default]
    Table,
    /// One JSON object per statement.
    Json,
}

/// Newlines inside a cell would break the row.
fn escape_cell(text: &str) -> String {
    text.replace('\n', "\\n")
}

pub fn write_table<W: Write>(out: &mut W, lines: &[CompiledLine], targets: &[Target]) -> io::Result<()> {
    let mut header = vec!["No.", "IntentLang", "JSON Semantic Model"];
    header.extend(targets.iter().map(|t| t.title()));
    writeln!(out, "{}", header.join("\t"))?;

    for line in lines {
        let model = serde_json::to_string(&line.statement).map_err(io::Error::other)?;
        let mut row = vec![line.index.to_string(), escape_cell(&line.source), model];
        for target in targets {
            row.push(escape_cell(line.render_for(*target).unwrap_or_default()));
        }
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}

/// Rendered fragments keyed by target name, in backend order.
struct Renders<'a>(&'a [(Target, String)]);

impl Serialize for Renders<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(t, text)| (t.name(), text)))
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    line: usize,
    intent: &'a str,
    model: &'a Statement,
    targets: Renders<'a>,
}

pub fn write_json_lines<W: Write>(out: &mut W, lines: &[CompiledLine]) -> io::Result<()> {
    for line in lines {
        let record = JsonRecord {
            line: line.line,
            intent: &line.source,
            model: &line.statement,
            targets: Renders(&line.renders),
        };
        serde_json::to_writer(&mut *out, &record).map_err(io::Error::other)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    format: Format,
    lines: &[CompiledLine],
    targets: &[Target],
) -> io::Result<()> {
    match format {
        Format::Table => write_table(out, lines, targets),
        Format::Json => write_json_lines(out, lines),
    }
}
