//! Device reading command.

use std::io::Write;

use synse_proto::Reading;

use crate::cli::ReadArgs;
use crate::client::SynseClient;
use crate::error::CliError;
use crate::output::{reading_row, Filters, FormatFlags, Printer, Record, Sorters, Transform};

/// Column titles shared with the live streaming view.
pub const READING_HEADER: [&str; 4] = ["DEVICE", "TYPE", "VALUE", "TIMESTAMP"];

/// Handler for the read command.
pub struct ReadCommand {
    client: SynseClient,
}

impl ReadCommand {
    /// Create a new read command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute the read command.
    ///
    /// Reads one device when an ID is given, otherwise reads by
    /// namespace/tag selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the filter spec is
    /// malformed, or rendering fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        flags: FormatFlags,
        args: &ReadArgs,
    ) -> Result<(), CliError> {
        let readings = match &args.device {
            Some(device) => self.client.read_device(device).await?,
            None => self.client.read(args.ns.as_deref(), &args.tags).await?,
        };
        render(out, flags, args, readings)
    }
}

/// Sort keys supported by `read --sort`.
fn sorters() -> Sorters<Reading> {
    Sorters::new()
        .with("device", |a: &Reading, b| a.device.cmp(&b.device))
        .with("type", |a, b| a.reading_type.cmp(&b.reading_type))
        .with("timestamp", |a, b| a.timestamp.cmp(&b.timestamp))
}

/// Filter keys supported by `read --filter`.
fn filters() -> Filters<Reading> {
    Filters::new()
        .with("type", |reading: &Reading, value| reading.reading_type == value)
        .with("device", |reading, value| reading.device == value)
}

fn render<W: Write>(
    out: &mut W,
    flags: FormatFlags,
    args: &ReadArgs,
    mut readings: Vec<Reading>,
) -> Result<(), CliError> {
    let mut transform = Transform::new();
    transform.order_by(&args.sort, &sorters());
    if let Some(spec) = &args.filter {
        transform.filter(spec, &filters())?;
    }
    transform.apply(&mut readings);

    let records: Vec<Record> = readings.into_iter().map(Record::Reading).collect();
    let mut printer = Printer::new(out, flags);
    printer.set_header(&READING_HEADER);
    printer.set_row_fn(reading_row);
    printer.write_many(&records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use synse_proto::{ReadingValue, Unit};

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ReadArgs,
    }

    fn read_args(argv: &[&str]) -> ReadArgs {
        let mut full = vec!["harness"];
        full.extend_from_slice(argv);
        Harness::parse_from(full).args
    }

    fn reading(device: &str, kind: &str, value: f64) -> Reading {
        Reading {
            device: device.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            reading_type: kind.into(),
            device_type: kind.into(),
            unit: Some(Unit {
                name: "celsius".into(),
                symbol: "C".into(),
            }),
            value: Some(ReadingValue::Float(value)),
            context: Default::default(),
        }
    }

    #[test]
    fn render_sorts_by_device_then_type() {
        let readings = vec![
            reading("dev-b", "temperature", 1.0),
            reading("dev-a", "humidity", 2.0),
            reading("dev-a", "airflow", 3.0),
        ];
        let mut buf = Vec::new();
        render(&mut buf, FormatFlags::default(), &read_args(&[]), readings).unwrap();

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("dev-a") && lines[1].contains("airflow"));
        assert!(lines[2].starts_with("dev-a") && lines[2].contains("humidity"));
        assert!(lines[3].starts_with("dev-b") && lines[3].contains("temperature"));
    }

    #[test]
    fn render_filter_keeps_matching_type() {
        let readings = vec![
            reading("dev-a", "temperature", 1.0),
            reading("dev-b", "humidity", 2.0),
        ];
        let mut buf = Vec::new();
        render(
            &mut buf,
            FormatFlags::default(),
            &read_args(&["--filter", "type=humidity"]),
            readings,
        )
        .unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert!(!output.contains("dev-a"));
        assert!(output.contains("dev-b"));
    }

    #[test]
    fn render_shows_value_with_unit() {
        let readings = vec![reading("dev-a", "temperature", 20.3)];
        let mut buf = Vec::new();
        render(&mut buf, FormatFlags::default(), &read_args(&[]), readings).unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("20.3 C"));
    }

    #[test]
    fn render_json_round_trips() {
        let readings = vec![reading("dev-a", "temperature", 20.3)];
        let flags = FormatFlags {
            json: true,
            ..Default::default()
        };
        let mut buf = Vec::new();
        render(&mut buf, flags, &read_args(&[]), readings.clone()).unwrap();

        let parsed: Vec<Reading> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, readings);
    }
}
