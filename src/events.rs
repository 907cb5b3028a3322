//! Explicit observability collaborator
//!
//! Components receive an [`EventSink`] instead of writing to a global logger.
//! Each emitted [`Event`] is mirrored to `tracing` and broadcast to every
//! subscriber.

use crate::types::Event;
use tokio::sync::broadcast;

/// Default capacity of the broadcast channel
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out sink for [`Event`]s
#[derive(Clone, Debug)]
pub struct EventSink {
    tx: broadcast::Sender<Event>,
}

impl EventSink {
    /// Create a sink with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to events emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Log the event and broadcast it. Having no subscribers is not an error.
    pub fn emit(&self, event: Event) {
        match &event {
            Event::TableIgnored { table } => {
                tracing::info!(table = %table, "both 'query' and 'dbtable' are set, 'dbtable' will be ignored");
            }
            Event::QueryExecuting { query } => {
                tracing::info!(query = %query, "executing query");
            }
            Event::TableReading { table } => {
                tracing::info!(table = %table, "reading table");
            }
            Event::FileSaved { url, path, bytes } => {
                tracing::debug!(url = %url, path = %path.display(), bytes, "file saved");
            }
            Event::DownloadRejected {
                url,
                status,
                reason,
            } => {
                tracing::warn!(url = %url, status, reason = %reason, "download rejected");
            }
            Event::ColumnDownloaded {
                column,
                rows,
                saved,
                rejected,
            } => {
                tracing::info!(column = %column, rows, saved, rejected, "download column complete");
            }
        }
        self.tx.send(event).ok();
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscribers_is_fine() {
        let sink = EventSink::default();
        sink.emit(Event::QueryExecuting {
            query: "select 1".into(),
        });
    }

    #[test]
    fn subscribers_receive_events_in_order() {
        let sink = EventSink::default();
        let mut rx = sink.subscribe();
        sink.emit(Event::TableIgnored {
            table: "t".into(),
        });
        sink.emit(Event::QueryExecuting {
            query: "select 1".into(),
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            Event::TableIgnored { table: "t".into() }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            Event::QueryExecuting {
                query: "select 1".into()
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
