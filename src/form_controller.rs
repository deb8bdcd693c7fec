use crate::backend::ReservationApi;
use crate::error::{Operation, OperationError};
use crate::types::{Draft, Reservation, ReservationId};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ReservationId),
}

impl FormMode {
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Schedule",
            FormMode::Edit(_) => "Update",
        }
    }
}

/// Draft values of the reservation form and the reservation being edited, if any.
#[derive(Debug, Default)]
pub struct FormController {
    draft: Draft,
    selected: Option<Reservation>,
}

impl FormController {
    pub fn mode(&self) -> FormMode {
        match &self.selected {
            Some(reservation) => FormMode::Edit(reservation.id.clone()),
            None => FormMode::Create,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn selected(&self) -> Option<&Reservation> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, reservation: &Reservation) {
        self.draft = Draft::from(reservation);
        self.selected = Some(reservation.clone());
    }

    pub fn cancel(&mut self) {
        self.selected = None;
        self.draft = Draft::default();
    }

    pub fn set_room(&mut self, room: impl Into<String>) {
        self.draft.room = room.into();
    }

    pub fn set_scheduled_at(&mut self, scheduled_at: impl Into<String>) {
        self.draft.scheduled_at = scheduled_at.into();
    }

    /// Sends the draft as a new reservation or as the replacement of the
    /// selected one. The form is only reset when the service accepted it.
    pub async fn submit<A>(&mut self, api: &A) -> Result<(), OperationError>
    where
        A: ReservationApi + ?Sized,
    {
        let result = match self.mode() {
            FormMode::Create => {
                info!(room = %self.draft.room, "Creating reservation");
                api.create(&self.draft).await
            }
            FormMode::Edit(id) => {
                info!(%id, room = %self.draft.room, "Updating reservation");
                api.update(&id, &self.draft).await
            }
        };

        result.map_err(|source| OperationError::new(Operation::Save, source))?;
        self.cancel();
        Ok(())
    }
}
