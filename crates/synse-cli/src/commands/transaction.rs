//! Write transaction inspection command.

use std::io::Write;

use crate::client::SynseClient;
use crate::error::CliError;
use crate::output::{text_row, transaction_status_row, FormatFlags, Printer, Record};

/// Handler for the transaction command.
pub struct TransactionCommand {
    client: SynseClient,
}

impl TransactionCommand {
    /// Create a new transaction command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute the transaction command.
    ///
    /// With an ID, shows that transaction's status; without one, lists
    /// the IDs of all cached transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or rendering fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        flags: FormatFlags,
        id: Option<&str>,
    ) -> Result<(), CliError> {
        match id {
            Some(id) => {
                let status = self.client.transaction(id).await?;
                let mut printer = Printer::new(out, flags);
                printer.set_header(&["ID", "STATUS", "ACTION", "DEVICE", "MESSAGE"]);
                printer.set_row_fn(transaction_status_row);
                printer.write_one(&Record::TransactionStatus(status))?;
            }
            None => {
                let ids = self.client.transactions().await?;
                let records: Vec<Record> = ids.into_iter().map(Record::Text).collect();
                let mut printer = Printer::new(out, flags);
                printer.set_header(&["ID"]);
                printer.set_row_fn(text_row);
                printer.write_many(&records)?;
            }
        }
        Ok(())
    }
}
