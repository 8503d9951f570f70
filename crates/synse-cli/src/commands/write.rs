//! Device write command.

use std::io::Write;

use synse_proto::WritePayload;

use crate::cli::WriteArgs;
use crate::client::SynseClient;
use crate::error::CliError;
use crate::output::{
    transaction_row, transaction_status_row, FormatFlags, Printer, Record,
};

/// Handler for the write command.
pub struct WriteCommand {
    client: SynseClient,
}

impl WriteCommand {
    /// Create a new write command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute the write command.
    ///
    /// Asynchronous writes return transaction handles to poll later;
    /// `--wait` blocks on the server until the write resolves and
    /// returns the final statuses instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or rendering fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        flags: FormatFlags,
        args: &WriteArgs,
    ) -> Result<(), CliError> {
        let payload = WritePayload::new(&args.action, args.data.clone().unwrap_or_default());

        if args.wait {
            let statuses = self
                .client
                .write_wait(&args.device, std::slice::from_ref(&payload))
                .await?;
            let records: Vec<Record> = statuses
                .into_iter()
                .map(Record::TransactionStatus)
                .collect();
            let mut printer = Printer::new(out, flags);
            printer.set_header(&["ID", "STATUS", "ACTION", "DEVICE", "MESSAGE"]);
            printer.set_row_fn(transaction_status_row);
            printer.write_many(&records)?;
        } else {
            let transactions = self
                .client
                .write(&args.device, std::slice::from_ref(&payload))
                .await?;
            let records: Vec<Record> = transactions.into_iter().map(Record::Transaction).collect();
            let mut printer = Printer::new(out, flags);
            printer.set_header(&["ID", "ACTION", "DATA", "DEVICE", "TIMEOUT"]);
            printer.set_row_fn(transaction_row);
            printer.write_many(&records)?;
        }
        Ok(())
    }
}
