//! Device enumeration command.

use std::io::Write;

use synse_proto::DeviceSummary;

use crate::cli::ScanArgs;
use crate::client::SynseClient;
use crate::error::CliError;
use crate::output::{device_row, Filters, FormatFlags, Printer, Record, Sorters, Transform};

/// Handler for the scan command.
pub struct ScanCommand {
    client: SynseClient,
}

impl ScanCommand {
    /// Create a new scan command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute the scan command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the filter spec is
    /// malformed, or rendering fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        flags: FormatFlags,
        args: &ScanArgs,
    ) -> Result<(), CliError> {
        let devices = self
            .client
            .scan(args.ns.as_deref(), &args.tags, args.force)
            .await?;
        render(out, flags, args, devices)
    }
}

/// Sort keys supported by `scan --sort`.
fn sorters() -> Sorters<DeviceSummary> {
    Sorters::new()
        .with("id", |a: &DeviceSummary, b| a.id.cmp(&b.id))
        .with("type", |a, b| a.device_type.cmp(&b.device_type))
        .with("plugin", |a, b| a.plugin.cmp(&b.plugin))
        .with("alias", |a, b| a.alias.cmp(&b.alias))
}

/// Filter keys supported by `scan --filter`.
fn filters() -> Filters<DeviceSummary> {
    Filters::new()
        .with("type", |device: &DeviceSummary, value| device.device_type == value)
        .with("plugin", |device, value| device.plugin == value)
}

fn render<W: Write>(
    out: &mut W,
    flags: FormatFlags,
    args: &ScanArgs,
    mut devices: Vec<DeviceSummary>,
) -> Result<(), CliError> {
    let mut transform = Transform::new();
    transform.order_by(&args.sort, &sorters());
    if let Some(spec) = &args.filter {
        transform.filter(spec, &filters())?;
    }
    transform.apply(&mut devices);

    let records: Vec<Record> = devices.into_iter().map(Record::Device).collect();
    let mut printer = Printer::new(out, flags);
    printer.set_header(&["ID", "TYPE", "INFO", "PLUGIN"]);
    printer.set_row_fn(device_row);
    printer.write_many(&records)?;
    Ok(())
}
