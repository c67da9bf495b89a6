use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt, future};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// Fans newly created records out to live subscribers.
#[derive(Clone)]
pub struct ChangeFeed<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> ChangeFeed<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, record: T) {
        // No subscribers is not an error.
        self.tx.send(record).ok();
    }

    pub fn subscribe(&self) -> impl Stream<Item = T> + Send + use<T> {
        BroadcastStream::new(self.tx.subscribe()).filter_map(|item| match item {
            Ok(record) => future::ready(Some(record)),
            Err(err) => {
                tracing::warn!(error = %err, "change feed subscriber lagged");
                future::ready(None)
            },
        })
    }
}

impl<T: Clone + Serialize + Send + 'static> ChangeFeed<T> {
    pub fn sse(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + use<T>> {
        let events = self.subscribe().filter_map(|record| {
            future::ready(match Event::default().json_data(&record) {
                Ok(event) => Some(Ok(event)),
                Err(err) => {
                    tracing::warn!(error = %err, "dropping unserializable record");
                    None
                },
            })
        });
        Sse::new(events).keep_alive(KeepAlive::default())
    }
}
