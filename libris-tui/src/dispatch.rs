//! Background search tasks feeding the event loop.

use crate::api_client::{CatalogTransport, SearchExecutor};
use crate::events::TuiEvent;
use libris_core::{RequestDescriptor, SearchCriteria, SearchTicket};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Run one search on the runtime. Loading changes and the settlement are
/// posted back tagged with `ticket`; the session decides whether they still
/// matter.
pub fn spawn_search<T>(
    executor: SearchExecutor<T>,
    ticket: SearchTicket,
    request: RequestDescriptor,
    criteria: SearchCriteria,
    sender: mpsc::Sender<TuiEvent>,
) -> JoinHandle<()>
where
    T: CatalogTransport + 'static,
{
    tokio::spawn(async move {
        let loading_tx = sender.clone();
        let outcome = executor
            .execute(&request, criteria, |loading| {
                if let Err(err) = loading_tx.try_send(TuiEvent::Loading { ticket, loading }) {
                    tracing::debug!(generation = ticket.generation(), error = %err, "Dropped loading event");
                }
            })
            .await;

        let event = TuiEvent::Settled {
            ticket,
            outcome: Box::new(outcome),
        };
        if sender.send(event).await.is_err() {
            tracing::debug!(generation = ticket.generation(), "Event loop closed before settlement");
        }
    })
}
