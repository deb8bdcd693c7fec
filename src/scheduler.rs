use crate::backend::ReservationApi;
use crate::error::{Operation, OperationError};
use crate::form_controller::FormController;
use crate::reservation_store::{LoadOutcome, ReservationStore};
use crate::types::{Reservation, ReservationId};
use tracing::info;

/// Connects user intents to the form, the reservation service and the store.
///
/// Every successful mutation is followed by a full reload of the collection.
/// The local list is never patched, so it always shows what the service
/// returned last.
pub struct Scheduler<A: ReservationApi> {
    api: A,
    store: ReservationStore,
    form: FormController,
}

impl<A: ReservationApi> Scheduler<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: ReservationStore::default(),
            form: FormController::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &ReservationStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub async fn load(&mut self) -> Result<LoadOutcome, OperationError> {
        self.store.load(&self.api).await
    }

    pub fn select(&mut self, reservation: &Reservation) {
        self.form.select(reservation);
    }

    pub fn clear_selection(&mut self) {
        self.form.cancel();
    }

    pub fn set_room(&mut self, room: impl Into<String>) {
        self.form.set_room(room);
    }

    pub fn set_scheduled_at(&mut self, scheduled_at: impl Into<String>) {
        self.form.set_scheduled_at(scheduled_at);
    }

    pub async fn submit(&mut self) -> Result<(), OperationError> {
        if let Err(err) = self.form.submit(&self.api).await {
            self.store.record_error(&err);
            return Err(err);
        }
        self.reload_after_mutation().await;
        Ok(())
    }

    pub async fn remove(&mut self, id: &ReservationId) -> Result<(), OperationError> {
        info!(%id, "Removing reservation");
        if let Err(source) = self.api.delete(id).await {
            let err = OperationError::new(Operation::Delete, source);
            self.store.record_error(&err);
            return Err(err);
        }

        if self.form.selected().is_some_and(|selected| &selected.id == id) {
            self.form.cancel();
        }
        self.reload_after_mutation().await;
        Ok(())
    }

    async fn reload_after_mutation(&mut self) {
        self.store.clear_error();
        // A failed reload is reported through the banner; the mutation itself succeeded.
        let _ = self.load().await;
    }
}
