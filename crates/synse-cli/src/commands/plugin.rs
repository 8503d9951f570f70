//! Plugin inspection commands.

use std::io::Write;

use crate::cli::PluginCommands;
use crate::client::SynseClient;
use crate::error::CliError;
use crate::output::{plugin_health_row, plugin_row, FormatFlags, Printer, Record};

/// Handler for the plugin command family.
pub struct PluginCommand {
    client: SynseClient,
}

impl PluginCommand {
    /// Create a new plugin command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute a plugin subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or rendering fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        flags: FormatFlags,
        command: &PluginCommands,
    ) -> Result<(), CliError> {
        match command {
            PluginCommands::List => {
                let plugins = self.client.plugins().await?;
                let records: Vec<Record> = plugins.into_iter().map(Record::Plugin).collect();
                let mut printer = Printer::new(out, flags);
                printer.set_header(&["ID", "NAME", "TAG", "ACTIVE"]);
                printer.set_row_fn(plugin_row);
                printer.write_many(&records)?;
            }
            PluginCommands::Info { id } => {
                let plugin = self.client.plugin(id).await?;
                let mut printer = Printer::new(out, flags);
                printer.set_header(&["ID", "NAME", "TAG", "ACTIVE"]);
                printer.set_row_fn(plugin_row);
                printer.write_one(&Record::Plugin(plugin))?;
            }
            PluginCommands::Health => {
                let health = self.client.plugin_health().await?;
                let mut printer = Printer::new(out, flags);
                printer.set_header(&["STATUS", "HEALTHY", "UNHEALTHY", "ACTIVE", "INACTIVE"]);
                printer.set_row_fn(plugin_health_row);
                printer.write_one(&Record::PluginHealth(health))?;
            }
        }
        Ok(())
    }
}
