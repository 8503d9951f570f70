//! Server metadata commands: status, version, and config.

use std::io::Write;

use crate::client::SynseClient;
use crate::error::CliError;
use crate::output::{status_row, version_row, FormatFlags, Printer, Record};

/// Handler for the status, version, and config commands.
pub struct ServerCommand {
    client: SynseClient,
}

impl ServerCommand {
    /// Create a new server command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute the status command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or rendering fails.
    pub async fn status<W: Write>(&self, out: &mut W, flags: FormatFlags) -> Result<(), CliError> {
        let status = self.client.status().await?;
        let mut printer = Printer::new(out, flags);
        printer.set_header(&["STATUS", "TIMESTAMP"]);
        printer.set_row_fn(status_row);
        printer.write_one(&Record::Status(status))?;
        Ok(())
    }

    /// Execute the version command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or rendering fails.
    pub async fn version<W: Write>(&self, out: &mut W, flags: FormatFlags) -> Result<(), CliError> {
        let version = self.client.version().await?;
        let mut printer = Printer::new(out, flags);
        printer.set_header(&["VERSION", "API_VERSION"]);
        printer.set_row_fn(version_row);
        printer.write_one(&Record::Version(version))?;
        Ok(())
    }

    /// Execute the config command.
    ///
    /// The config document has no fixed shape, so there is no table form;
    /// it renders as YAML unless JSON was requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or rendering fails.
    pub async fn config<W: Write>(&self, out: &mut W, flags: FormatFlags) -> Result<(), CliError> {
        let config = self.client.config().await?;
        if flags.json {
            let text = serde_json::to_string_pretty(&config)
                .map_err(|e| CliError::Protocol(e.to_string()))?;
            writeln!(out, "{text}")?;
        } else {
            let text =
                serde_yaml::to_string(&config).map_err(|e| CliError::Protocol(e.to_string()))?;
            write!(out, "{text}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn status_fails_without_server() {
        // Port 1 is never a Synse Server; the request errors fast.
        let cmd = ServerCommand::new(SynseClient::new("localhost:1").unwrap());
        let mut buf = Vec::new();
        let result = cmd.status(&mut buf, FormatFlags::default()).await;
        assert!(result.is_err());
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn version_fails_without_server() {
        let cmd = ServerCommand::new(SynseClient::new("localhost:1").unwrap());
        let mut buf = Vec::new();
        let result = cmd.version(&mut buf, FormatFlags::default()).await;
        assert!(result.is_err());
    }
}
