//! Device info command.

use std::io::Write;

use crate::client::SynseClient;
use crate::error::CliError;
use crate::output::{device_info_row, FormatFlags, Printer, Record};

/// Handler for the info command.
pub struct InfoCommand {
    client: SynseClient,
}

impl InfoCommand {
    /// Create a new info command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute the info command.
    ///
    /// The table form is a one-row summary; JSON/YAML expose the full
    /// device document including capabilities and outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or rendering fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        flags: FormatFlags,
        device: &str,
    ) -> Result<(), CliError> {
        let device = self.client.info(device).await?;
        let mut printer = Printer::new(out, flags);
        printer.set_header(&["ID", "ALIAS", "TYPE", "MODE", "INFO"]);
        printer.set_row_fn(device_info_row);
        printer.write_one(&Record::DeviceInfo(Box::new(device)))?;
        Ok(())
    }
}
