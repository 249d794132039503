//! Single-flight load guard.
//!
//! Every request gets a [`Ticket`]. Only the completion carrying the ticket of
//! the latest request is committed; completions for superseded tickets are
//! dropped, whatever order they arrive in.

use tracing::{debug, info};

use crate::error::LoadError;

/// Identifies one issued request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    id: u64,
    location: String,
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// The visible result for a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed<T> {
    pub location: String,
    pub result: Result<T, LoadError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result is now the visible one
    Committed,
    /// A newer request was issued; the result was dropped
    Superseded,
}

#[derive(Debug)]
pub struct LoadGuard<T> {
    next_id: u64,
    pending: Option<Ticket>,
    committed: Option<Committed<T>>,
}

impl<T> Default for LoadGuard<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: None,
            committed: None,
        }
    }
}

impl<T> LoadGuard<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `location`, superseding any pending one.
    pub fn request(&mut self, location: impl Into<String>) -> Ticket {
        self.next_id += 1;
        let ticket = Ticket {
            id: self.next_id,
            location: location.into(),
        };
        if let Some(previous) = self.pending.replace(ticket.clone()) {
            debug!(
                "request #{} for {} supersedes #{} for {}",
                ticket.id, ticket.location, previous.id, previous.location
            );
        }
        info!("loading {} (#{})", ticket.location, ticket.id);
        ticket
    }

    /// Start a request unless `location` is already pending, or already
    /// committed with nothing pending.
    pub fn request_if_changed(&mut self, location: &str) -> Option<Ticket> {
        let unchanged = match (&self.pending, &self.committed) {
            (Some(pending), _) => pending.location == location,
            (None, Some(committed)) => committed.location == location,
            (None, None) => false,
        };
        if unchanged {
            None
        } else {
            Some(self.request(location))
        }
    }

    /// Deliver the outcome of a request.
    pub fn complete(&mut self, ticket: &Ticket, result: Result<T, LoadError>) -> Completion {
        if self.pending.as_ref() != Some(ticket) {
            debug!(
                "dropping result #{} for {}: superseded",
                ticket.id, ticket.location
            );
            return Completion::Superseded;
        }
        self.pending = None;
        self.committed = Some(Committed {
            location: ticket.location.clone(),
            result,
        });
        debug!("committed #{} for {}", ticket.id, ticket.location);
        Completion::Committed
    }

    pub fn pending(&self) -> Option<&Ticket> {
        self.pending.as_ref()
    }

    pub fn current(&self) -> Option<&Committed<T>> {
        self.committed.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
