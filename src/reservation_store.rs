use crate::backend::ReservationApi;
use crate::error::{ApiError, Operation, OperationError};
use crate::types::{Reservation, ReservationId};
use tracing::{debug, info, warn};

/// Marks an outstanding list request. Tickets are handed out in increasing
/// order, a result is only applied if its ticket is newer than the last one
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer result was already applied; this one was dropped.
    Discarded,
}

/// The reservations shown to the user and the current error banner.
///
/// The list always mirrors the last successfully fetched collection of the
/// service. It is never patched locally.
#[derive(Debug, Default)]
pub struct ReservationStore {
    reservations: Vec<Reservation>,
    error: Option<String>,
    issued: u64,
    applied: u64,
}

impl ReservationStore {
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|reservation| &reservation.id == id)
    }

    /// Most recent error message, if the last outcome was a failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn record_error(&mut self, err: &OperationError) {
        warn!(%err, "Operation failed");
        self.error = Some(err.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Applies the result of the list request identified by `ticket`.
    ///
    /// Success replaces the whole collection and clears the banner. Failure
    /// keeps the previous collection and sets the banner. Results older than
    /// the last applied one are dropped either way.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Reservation>, ApiError>,
    ) -> Result<LoadOutcome, OperationError> {
        if ticket.0 <= self.applied {
            debug!(
                ticket = ticket.0,
                applied = self.applied,
                "Discarding stale reservation list"
            );
            return Ok(LoadOutcome::Discarded);
        }
        self.applied = ticket.0;

        match result {
            Ok(reservations) => {
                info!(count = reservations.len(), "Reservations loaded");
                self.reservations = reservations;
                self.error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(source) => {
                let err = OperationError::new(Operation::FetchList, source);
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Fetches the full collection and replaces the local list with it.
    pub async fn load<A>(&mut self, api: &A) -> Result<LoadOutcome, OperationError>
    where
        A: ReservationApi + ?Sized,
    {
        let ticket = self.begin_load();
        let result = api.list().await;
        self.apply_load(ticket, result)
    }
}
