//! A viewer session: one visible document, loaded in the background.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{RecvTimeoutError, TryRecvError};
use jsview_schema::Document;
use tracing::{info, warn};

use crate::fetch::Fetch;
use crate::guard::{Committed, Completion, LoadGuard, Ticket};
use crate::pool::{LoadPool, LoadResponse};
use crate::recent::RecentlyViewed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WaitError {
    #[error("Timed out waiting for the schema to load")]
    Timeout,
    #[error("All load workers have exited")]
    Disconnected,
    #[error("No schema has been requested")]
    NothingRequested,
}

pub struct Session {
    guard: LoadGuard<Arc<Document>>,
    pool: LoadPool,
    recent: Option<Box<dyn RecentlyViewed>>,
}

impl Session {
    pub fn new(fetcher: Arc<dyn Fetch>, num_workers: usize) -> io::Result<Self> {
        Ok(Self {
            guard: LoadGuard::new(),
            pool: LoadPool::new(fetcher, num_workers)?,
            recent: None,
        })
    }

    pub fn with_recent(mut self, recent: Box<dyn RecentlyViewed>) -> Self {
        self.recent = Some(recent);
        self
    }

    /// Load `location` unless it is already shown or on its way.
    pub fn navigate(&mut self, location: &str) -> Option<Ticket> {
        let ticket = self.guard.request_if_changed(location)?;
        self.pool.submit(ticket.clone());
        Some(ticket)
    }

    /// Load `location` even if it is the one shown.
    pub fn reload(&mut self, location: &str) -> Ticket {
        let ticket = self.guard.request(location);
        self.pool.submit(ticket.clone());
        ticket
    }

    /// Handle one finished load if there is one, without blocking.
    pub fn poll(&mut self) -> Option<Completion> {
        match self.pool.receiver().try_recv() {
            Ok(response) => Some(self.handle(response)),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Handle one finished load, waiting up to `timeout` for it.
    pub fn poll_timeout(&mut self, timeout: Duration) -> Option<Completion> {
        match self.pool.receiver().recv_timeout(timeout) {
            Ok(response) => Some(self.handle(response)),
            Err(_) => None,
        }
    }

    /// Block until the pending request commits.
    ///
    /// Returns the current result straight away when nothing is pending.
    pub fn wait_for_commit(
        &mut self,
        timeout: Duration,
    ) -> Result<&Committed<Arc<Document>>, WaitError> {
        let deadline = Instant::now() + timeout;
        while self.guard.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.pool.receiver().recv_timeout(remaining) {
                Ok(response) => {
                    self.handle(response);
                }
                Err(RecvTimeoutError::Timeout) => return Err(WaitError::Timeout),
                Err(RecvTimeoutError::Disconnected) => return Err(WaitError::Disconnected),
            }
        }
        self.guard.current().ok_or(WaitError::NothingRequested)
    }

    pub fn current(&self) -> Option<&Committed<Arc<Document>>> {
        self.guard.current()
    }

    pub fn is_loading(&self) -> bool {
        self.guard.is_loading()
    }

    fn handle(&mut self, response: LoadResponse) -> Completion {
        let LoadResponse { ticket, result } = response;
        if let Err(e) = &result {
            warn!("{e}");
        }
        let completion = self.guard.complete(&ticket, result.map(Arc::new));
        if completion == Completion::Committed
            && let Some(Committed {
                result: Ok(document),
                ..
            }) = self.guard.current()
        {
            let title = document.title().unwrap_or(ticket.location());
            info!("showing {title} from {}", ticket.location());
            if let Some(recent) = &mut self.recent {
                recent.record(title, ticket.location());
            }
        }
        completion
    }
}
