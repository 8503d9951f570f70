//! The format-dispatching render engine.

use std::io::Write;

use serde::Serialize;

use super::row::{Cell, Record, RowFn};
use super::OutputError;

/// Per-invocation output format selection.
///
/// Built once from the parsed command line and passed down to every
/// handler; there is no process-wide format state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatFlags {
    /// Render as indented JSON.
    pub json: bool,
    /// Render as YAML.
    pub yaml: bool,
    /// Suppress the header line in table output.
    pub no_header: bool,
}

/// Renders records to a destination stream as a table, JSON, or YAML.
///
/// Exactly one format is active per printer. Selecting JSON or YAML
/// disables table output; table mode additionally needs a row function
/// registered via [`Printer::set_row_fn`] before anything can be written.
pub struct Printer<W> {
    out: W,
    table: bool,
    json: bool,
    yaml: bool,
    show_header: bool,
    header: Vec<Cell>,
    row_fn: Option<RowFn>,
}

impl<W: Write> Printer<W> {
    /// Create a printer for `out` with the given format flags.
    ///
    /// JSON or YAML being set disables table mode.
    #[must_use]
    pub fn new(out: W, flags: FormatFlags) -> Self {
        let structured = flags.json || flags.yaml;
        Self {
            out,
            table: !structured,
            json: flags.json,
            yaml: flags.yaml,
            show_header: !flags.no_header,
            header: Vec::new(),
            row_fn: None,
        }
    }

    /// Override the active modes directly.
    ///
    /// [`Printer::new`] keeps exactly one mode active; this is for callers
    /// that manage mode state themselves.
    pub fn set_modes(&mut self, table: bool, json: bool, yaml: bool) {
        self.table = table;
        self.json = json;
        self.yaml = yaml;
    }

    /// Set the column titles used in table mode.
    pub fn set_header(&mut self, names: &[&str]) {
        self.header = names.iter().map(|&name| name.to_string()).collect();
    }

    /// Register the row function used in table mode.
    pub fn set_row_fn(&mut self, row_fn: RowFn) {
        self.row_fn = Some(row_fn);
    }

    /// Render a single record.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no mode is active or table mode
    /// has no row function, a row extraction error from the row function,
    /// or an IO/serialization error from the destination.
    pub fn write_one(&mut self, record: &Record) -> Result<(), OutputError> {
        if self.table {
            self.write_table(std::slice::from_ref(record))
        } else {
            self.write_structured(record)
        }
    }

    /// Render a collection of records in order.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Printer::write_one`]; in table mode the
    /// first failing row aborts the call.
    pub fn write_many(&mut self, records: &[Record]) -> Result<(), OutputError> {
        if self.table {
            self.write_table(records)
        } else {
            self.write_structured(&records)
        }
    }

    fn write_structured<T: Serialize>(&mut self, data: &T) -> Result<(), OutputError> {
        if self.json {
            let text = serde_json::to_string_pretty(data)
                .map_err(|e| OutputError::Serialize(e.to_string()))?;
            writeln!(self.out, "{text}")?;
            Ok(())
        } else if self.yaml {
            let text =
                serde_yaml::to_string(data).map_err(|e| OutputError::Serialize(e.to_string()))?;
            write!(self.out, "{text}")?;
            Ok(())
        } else {
            Err(OutputError::NoOutputMode)
        }
    }

    fn write_table(&mut self, records: &[Record]) -> Result<(), OutputError> {
        let row_fn = self.row_fn.ok_or(OutputError::NoRowFunc)?;

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(row_fn(Some(record))?);
        }

        let header = (self.show_header && !self.header.is_empty()).then_some(&*self.header);
        let (header_line, data_lines) = layout(header, &rows);
        if let Some(line) = header_line {
            writeln!(self.out, "{line}")?;
        }
        for line in data_lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}

/// Lay out header and data rows as aligned lines.
///
/// Column widths are computed over the header and every row; cells are
/// left-padded to the column width with a two-space gutter. The last
/// column is never padded.
pub(crate) fn layout(header: Option<&[Cell]>, rows: &[Vec<Cell>]) -> (Option<String>, Vec<String>) {
    let mut widths: Vec<usize> = Vec::new();
    let all = header.into_iter().chain(rows.iter().map(Vec::as_slice));
    for row in all {
        if widths.len() < row.len() {
            widths.resize(row.len(), 0);
        }
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render = |row: &[Cell]| -> String {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                line.push_str(cell);
            } else {
                let pad = widths[i].saturating_sub(cell.chars().count());
                line.push_str(cell);
                line.extend(std::iter::repeat(' ').take(pad + 2));
            }
        }
        line.trim_end().to_string()
    };

    let header_line = header.map(|row| render(row));
    let data_lines = rows.iter().map(|row| render(row)).collect();
    (header_line, data_lines)
}
