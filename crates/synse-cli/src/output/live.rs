//! Live terminal view for streamed readings.
//!
//! Renders an unbounded stream of readings as a table that refreshes in
//! place. Rows are keyed by (device id, reading type): a later reading
//! for the same key overwrites the earlier row, so the table always shows
//! the latest value per key rather than a growing history.
//!
//! The view is a single cooperative loop: one `select!` over the reading
//! channel, the redraw tick, and the stop signal. The row map is owned by
//! the loop, so no locking is involved; the transport task on the other
//! end of the channel stops on its own once the receiver is dropped.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::{mpsc, watch};
use tracing::debug;

use synse_proto::Reading;

use super::printer::layout;
use super::row::{reading_cells, Cell};
use crate::error::CliError;

/// Default redraw cadence.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// A self-refreshing table over a stream of readings.
pub struct LiveView<W> {
    out: W,
    header: Vec<Cell>,
    tick: Duration,
    rows: BTreeMap<(String, String), Vec<Cell>>,
}

impl<W: Write> LiveView<W> {
    /// Create a view writing to `out`, redrawing every `tick`.
    #[must_use]
    pub fn new(out: W, header: &[&str], tick: Duration) -> Self {
        Self {
            out,
            header: header.iter().map(|&name| name.to_string()).collect(),
            tick,
            rows: BTreeMap::new(),
        }
    }

    /// Consume the stream until it ends, errors, or `stop` fires.
    ///
    /// The first transport error received on `rx` is returned as-is. A
    /// redraw failure stops the view the same way; dropping `rx` on the
    /// way out is what unblocks the sending side.
    ///
    /// # Errors
    ///
    /// Returns the first error observed by either the ingest or the
    /// render half of the loop.
    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<Result<Reading, CliError>>,
        mut stop: watch::Receiver<bool>,
    ) -> Result<(), CliError> {
        let mut ticker = tokio::time::interval(self.tick);
        loop {
            tokio::select! {
                item = rx.recv() => match item {
                    Some(Ok(reading)) => self.upsert(&reading),
                    Some(Err(e)) => return Err(e),
                    None => {
                        debug!("reading stream closed");
                        break;
                    }
                },
                _ = ticker.tick() => self.redraw()?,
                _ = stop.changed() => {
                    debug!("stop signal received");
                    break;
                }
            }
        }
        // Leave the final state on screen.
        self.redraw()?;
        Ok(())
    }

    /// Insert or overwrite the row for a reading's composite key.
    fn upsert(&mut self, reading: &Reading) {
        let key = (reading.device.clone(), reading.reading_type.clone());
        self.rows.insert(key, reading_cells(reading));
    }

    /// Number of rows currently tracked.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Clear the terminal and rewrite header plus every row, sorted
    /// lexicographically by rendered line.
    fn redraw(&mut self) -> Result<(), CliError> {
        crossterm::queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))
            .map_err(CliError::Io)?;

        let rows: Vec<Vec<Cell>> = self.rows.values().cloned().collect();
        let (header_line, mut data_lines) = layout(Some(&self.header), &rows);
        data_lines.sort();

        if let Some(line) = header_line {
            writeln!(self.out, "{line}")?;
        }
        for line in data_lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use synse_proto::ReadingValue;

    const CLEAR: &str = "\u{1b}[2J";

    fn reading(device: &str, kind: &str, value: f64) -> Reading {
        Reading {
            device: device.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            reading_type: kind.into(),
            device_type: kind.into(),
            unit: None,
            value: Some(ReadingValue::Float(value)),
            context: Default::default(),
        }
    }

    fn last_frame(output: &str) -> String {
        output.rsplit(CLEAR).next().unwrap_or_default().to_string()
    }

    #[test]
    fn upsert_overwrites_same_key() {
        let mut buf = Vec::new();
        let mut view = LiveView::new(&mut buf, &["DEVICE", "TYPE", "VALUE", "TIME"], DEFAULT_TICK);

        view.upsert(&reading("dev-1", "temperature", 20.3));
        view.upsert(&reading("dev-1", "temperature", 21.5));

        assert_eq!(view.row_count(), 1);
    }

    #[test]
    fn upsert_keeps_distinct_keys_apart() {
        let mut buf = Vec::new();
        let mut view = LiveView::new(&mut buf, &["DEVICE", "TYPE", "VALUE", "TIME"], DEFAULT_TICK);

        view.upsert(&reading("dev-1", "temperature", 20.3));
        view.upsert(&reading("dev-1", "humidity", 40.0));
        view.upsert(&reading("dev-2", "temperature", 19.0));

        assert_eq!(view.row_count(), 3);
    }

    #[tokio::test]
    async fn run_ends_when_stream_closes() {
        let mut buf = Vec::new();
        let view = LiveView::new(&mut buf, &["DEVICE", "TYPE", "VALUE", "TIME"], DEFAULT_TICK);

        let (tx, rx) = mpsc::channel(8);
        let (_stop_tx, stop_rx) = watch::channel(false);

        tx.send(Ok(reading("dev-1", "temperature", 20.3)))
            .await
            .unwrap();
        tx.send(Ok(reading("dev-1", "temperature", 21.5)))
            .await
            .unwrap();
        drop(tx);

        view.run(rx, stop_rx).await.unwrap();

        let frame = last_frame(&String::from_utf8(buf).unwrap());
        // One row for the key, holding the latest value.
        assert_eq!(frame.matches("dev-1").count(), 1);
        assert!(frame.contains("21.5"));
        assert!(!frame.contains("20.3"));
    }

    #[tokio::test]
    async fn run_returns_first_transport_error() {
        let mut buf = Vec::new();
        let view = LiveView::new(&mut buf, &["DEVICE", "TYPE", "VALUE", "TIME"], DEFAULT_TICK);

        let (tx, rx) = mpsc::channel(8);
        let (_stop_tx, stop_rx) = watch::channel(false);

        tx.send(Err(CliError::Connection("stream reset".into())))
            .await
            .unwrap();

        let err = view.run(rx, stop_rx).await.unwrap_err();
        assert!(matches!(err, CliError::Connection(_)));
    }

    #[tokio::test]
    async fn run_stops_on_signal() {
        let mut buf = Vec::new();
        let view = LiveView::new(&mut buf, &["DEVICE", "TYPE", "VALUE", "TIME"], DEFAULT_TICK);

        // Channel stays open; only the stop signal can end the loop.
        let (_tx, rx) = mpsc::channel::<Result<Reading, CliError>>(8);
        let (stop_tx, stop_rx) = watch::channel(false);

        stop_tx.send(true).unwrap();
        view.run(rx, stop_rx).await.unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("DEVICE"));
    }

    #[tokio::test]
    async fn rows_render_sorted_lexicographically() {
        let mut buf = Vec::new();
        let view = LiveView::new(&mut buf, &["DEVICE", "TYPE", "VALUE", "TIME"], DEFAULT_TICK);

        let (tx, rx) = mpsc::channel(8);
        let (_stop_tx, stop_rx) = watch::channel(false);

        tx.send(Ok(reading("dev-b", "temperature", 1.0)))
            .await
            .unwrap();
        tx.send(Ok(reading("dev-a", "temperature", 2.0)))
            .await
            .unwrap();
        drop(tx);

        view.run(rx, stop_rx).await.unwrap();

        let frame = last_frame(&String::from_utf8(buf).unwrap());
        let pos_a = frame.find("dev-a").unwrap();
        let pos_b = frame.find("dev-b").unwrap();
        assert!(pos_a < pos_b);
    }
}
