//! Live reading stream command.

use std::io::Write;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use synse_proto::stream::ReadStream;

use crate::cli::StreamArgs;
use crate::client::SynseClient;
use crate::commands::read::READING_HEADER;
use crate::error::CliError;
use crate::output::LiveView;

/// Buffer between the transport task and the view loop.
const CHANNEL_CAPACITY: usize = 64;

/// Handler for the stream command.
pub struct StreamCommand {
    client: SynseClient,
}

impl StreamCommand {
    /// Create a new stream command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute the stream command.
    ///
    /// Opens the reading stream and renders it as a live-updating table
    /// until Ctrl-C or a stream failure. The transport runs as its own
    /// task and talks to the view only through the reading channel; the
    /// stop signal reaches both through a shared watch channel.
    ///
    /// # Errors
    ///
    /// Returns the first error observed by the transport or the view.
    pub async fn execute<W: Write>(&self, out: W, args: &StreamArgs) -> Result<(), CliError> {
        let selector = ReadStream {
            ids: args.ids.clone(),
            tag_groups: args.tags.iter().map(|tag| vec![tag.clone()]).collect(),
        };

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (stop_tx, stop_rx) = watch::channel(false);

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(true);
            }
        });

        let client = self.client.clone();
        let transport_stop = stop_rx.clone();
        tokio::spawn(async move {
            if let Err(e) = client
                .stream_readings(selector, tx.clone(), transport_stop)
                .await
            {
                let _ = tx.send(Err(e)).await;
            }
        });

        let view = LiveView::new(out, &READING_HEADER, Duration::from_millis(args.interval));
        view.run(rx, stop_rx).await
    }
}
