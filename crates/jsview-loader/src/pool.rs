//! Worker threads that fetch and parse schema documents.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};
use jsview_schema::Document;
use tracing::{debug, trace};

use crate::error::LoadError;
use crate::fetch::Fetch;
use crate::guard::Ticket;
use crate::parse::parse_document;

#[derive(Debug)]
pub struct LoadRequest {
    pub ticket: Ticket,
}

#[derive(Debug)]
pub struct LoadResponse {
    pub ticket: Ticket,
    pub result: Result<Document, LoadError>,
}

/// Thread pool for loading documents.
///
/// Responses come back in completion order, not request order.
pub struct LoadPool {
    request_tx: Sender<LoadRequest>,
    response_rx: Receiver<LoadResponse>,
    _workers: Vec<JoinHandle<()>>,
}

impl LoadPool {
    pub fn new(fetcher: Arc<dyn Fetch>, num_workers: usize) -> io::Result<Self> {
        let (request_tx, request_rx) = unbounded::<LoadRequest>();
        let (response_tx, response_rx) = unbounded::<LoadResponse>();

        let mut workers = Vec::with_capacity(num_workers.max(1));
        for i in 0..num_workers.max(1) {
            let request_rx = request_rx.clone();
            let response_tx = response_tx.clone();
            let fetcher = Arc::clone(&fetcher);

            let handle = thread::Builder::new()
                .name(format!("jsview-load-{i}"))
                .spawn(move || worker_loop(fetcher.as_ref(), request_rx, response_tx))?;
            workers.push(handle);
        }

        Ok(Self {
            request_tx,
            response_rx,
            _workers: workers,
        })
    }

    pub fn submit(&self, ticket: Ticket) {
        // Only fails once every worker has exited
        let _ = self.request_tx.send(LoadRequest { ticket });
    }

    pub fn receiver(&self) -> &Receiver<LoadResponse> {
        &self.response_rx
    }
}

fn worker_loop(
    fetcher: &dyn Fetch,
    request_rx: Receiver<LoadRequest>,
    response_tx: Sender<LoadResponse>,
) {
    for request in request_rx {
        let result = load(fetcher, request.ticket.location());
        trace!(
            "worker finished #{} ({})",
            request.ticket.id(),
            if result.is_ok() { "ok" } else { "error" }
        );
        let response = LoadResponse {
            ticket: request.ticket,
            result,
        };
        if response_tx.send(response).is_err() {
            break;
        }
    }
}

/// Fetch and parse one document.
pub fn load(fetcher: &dyn Fetch, location: &str) -> Result<Document, LoadError> {
    debug!("fetching {location}");
    let text = fetcher
        .fetch(location)
        .map_err(|e| LoadError::new(location, e.to_string()))?;
    parse_document(location, &text)
}
