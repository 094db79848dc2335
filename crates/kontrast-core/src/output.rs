//! Result table output in CSV or JSON Lines format.
//!
//! Both formats carry the same flat table: `stem` and `rms_contrast`, plus
//! `file_image`, `mask` and `label` when extra columns are enabled.

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{KontrastError, Result};
use crate::labels::LabelMask;
use crate::types::{Measurement, ResultTable};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

const BASE_COLUMNS: [&str; 2] = ["stem", "rms_contrast"];
const EXTRA_COLUMNS: [&str; 3] = ["file_image", "mask", "label"];

/// One output row as serialized for JSON Lines.
#[derive(Serialize)]
struct Row<'a> {
    stem: &'a str,
    rms_contrast: f64,
    #[serde(flatten)]
    extra: Option<ExtraColumns>,
}

#[derive(Serialize)]
struct ExtraColumns {
    file_image: String,
    mask: Option<String>,
    label: Option<String>,
}

impl ExtraColumns {
    fn for_measurement(m: &Measurement) -> Self {
        let mask = LabelMask::from_stem(&m.stem);
        Self {
            file_image: m
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            mask: mask.map(|mask| mask.to_string()),
            label: mask.map(|mask| mask.label()),
        }
    }
}

/// A writer that serializes a result table as CSV or JSONL.
pub struct TableWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    extra_columns: bool,
    rows_written: usize,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The underlying writer (file, buffer, etc.)
    /// * `format` - Output format
    /// * `extra_columns` - Whether to add `file_image`, `mask` and `label`
    pub fn new(writer: W, format: OutputFormat, extra_columns: bool) -> Self {
        Self {
            writer,
            format,
            extra_columns,
            rows_written: 0,
        }
    }

    /// Write the whole table, including the CSV header.
    pub fn write_table(&mut self, table: &ResultTable) -> io::Result<()> {
        if self.format == OutputFormat::Csv {
            self.write_header()?;
        }
        for row in table.rows() {
            self.write_row(row)?;
        }
        Ok(())
    }

    fn write_header(&mut self) -> io::Result<()> {
        let mut columns = BASE_COLUMNS.to_vec();
        if self.extra_columns {
            columns.extend(EXTRA_COLUMNS);
        }
        writeln!(self.writer, "{}", columns.join(","))
    }

    fn write_row(&mut self, m: &Measurement) -> io::Result<()> {
        let extra = self
            .extra_columns
            .then(|| ExtraColumns::for_measurement(m));

        match self.format {
            OutputFormat::Csv => {
                let mut fields = vec![csv_field(&m.stem), format_metric(m.rms_contrast)];
                if let Some(extra) = extra {
                    fields.push(csv_field(&extra.file_image));
                    fields.push(extra.mask.unwrap_or_default());
                    fields.push(csv_field(&extra.label.unwrap_or_default()));
                }
                writeln!(self.writer, "{}", fields.join(","))?;
            }
            OutputFormat::JsonLines => {
                let row = Row {
                    stem: &m.stem,
                    rms_contrast: m.rms_contrast,
                    extra,
                };
                serde_json::to_writer(&mut self.writer, &row).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        self.rows_written += 1;
        Ok(())
    }

    /// Get the number of rows written.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write `table` to `path`, replacing any existing file.
pub fn write_table_file(
    path: &Path,
    table: &ResultTable,
    format: OutputFormat,
    extra_columns: bool,
) -> Result<()> {
    let to_output_err = |source| KontrastError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_output_err)?;
    let mut writer = TableWriter::new(BufWriter::new(file), format, extra_columns);
    writer.write_table(table).map_err(to_output_err)?;
    writer.flush().map_err(to_output_err)?;
    tracing::debug!("Wrote {} row(s) to {:?}", writer.rows_written(), path);
    Ok(())
}

/// Decimal rendering that always keeps a fractional part (`0.0`, not `0`).
pub fn format_metric(value: f64) -> String {
    let text = value.to_string();
    if !value.is_finite() || text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render the first `rows` rows as an aligned plain-text table.
pub fn render_preview(table: &ResultTable, rows: usize) -> String {
    let head = table.head(rows);
    let width = head
        .iter()
        .map(|m| m.stem.chars().count())
        .chain(std::iter::once(BASE_COLUMNS[0].len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{:<width$}  {}\n", BASE_COLUMNS[0], BASE_COLUMNS[1]);
    for m in head {
        out.push_str(&format!("{:<width$}  {:.6}\n", m.stem, m.rms_contrast));
    }
    if table.len() > head.len() {
        out.push_str(&format!("... {} more row(s)\n", table.len() - head.len()));
    }
    out
}
