use crate::backend::ReservationApi;
use crate::error::ApiError;
use crate::types::{Draft, Reservation, ReservationId};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::{debug, warn};

const RESERVATIONS_PATH: &str = "reservations";

/// Talks to the reservation service over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpReservationApi {
    client: Client,
    base_url: Url,
}

impl HttpReservationApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidAddress {
            address: base_url.into(),
            reason,
        };

        let url = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, id: Option<&ReservationId>) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(RESERVATIONS_PATH);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        warn!(%status, url = %response.url(), "Reservation service rejected request");
        return Err(ApiError::Status {
            status: status.as_u16(),
        });
    }
    Ok(response)
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    async fn list(&self) -> Result<Vec<Reservation>, ApiError> {
        let url = self.endpoint(None);
        debug!(%url, "GET reservations");
        let response = check_status(self.client.get(url).send().await?)?;
        let reservations: Vec<Reservation> = response.json().await?;
        debug!(count = reservations.len(), "Received reservations");
        Ok(reservations)
    }

    async fn create(&self, draft: &Draft) -> Result<(), ApiError> {
        let url = self.endpoint(None);
        debug!(%url, room = %draft.room, "POST reservation");
        check_status(self.client.post(url).json(draft).send().await?)?;
        Ok(())
    }

    async fn update(&self, id: &ReservationId, draft: &Draft) -> Result<(), ApiError> {
        let url = self.endpoint(Some(id));
        debug!(%url, room = %draft.room, "PUT reservation");
        check_status(self.client.put(url).json(draft).send().await?)?;
        Ok(())
    }

    async fn delete(&self, id: &ReservationId) -> Result<(), ApiError> {
        let url = self.endpoint(Some(id));
        debug!(%url, "DELETE reservation");
        check_status(self.client.delete(url).send().await?)?;
        Ok(())
    }
}
