use std::sync::{
    atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::{
    backend::ReservationApi,
    error::ApiError,
    types::{Draft, Reservation, ReservationId},
};

pub struct InMemoryReservationsInner {
    pub success: AtomicBool,
    pub calls_to_list: AtomicU64,
    pub calls_to_create: AtomicU64,
    pub calls_to_update: AtomicU64,
    pub calls_to_delete: AtomicU64,
    pub next_id: AtomicI64,
    pub reservations: Mutex<Vec<Reservation>>,
}

/// Reservation service kept in memory. Ids are assigned from 1 upwards.
#[derive(Clone)]
pub struct InMemoryReservations(pub Arc<InMemoryReservationsInner>);

impl InMemoryReservationsInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_list: AtomicU64::default(),
            calls_to_create: AtomicU64::default(),
            calls_to_update: AtomicU64::default(),
            calls_to_delete: AtomicU64::default(),
            next_id: AtomicI64::new(1),
            reservations: Mutex::default(),
        }
    }
}

impl InMemoryReservations {
    pub fn new() -> Self {
        Self(Arc::new(InMemoryReservationsInner::new()))
    }

    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        let service = Self::new();
        let highest_id = reservations
            .iter()
            .filter_map(|reservation| match reservation.id {
                ReservationId::Number(id) => Some(id),
                ReservationId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        service.0.next_id.store(highest_id + 1, Ordering::SeqCst);
        *service.0.reservations.lock().unwrap() = reservations;
        service
    }

    pub fn set_success(&self, success: bool) {
        self.0.success.store(success, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Reservation> {
        self.0.reservations.lock().unwrap().clone()
    }

    pub fn calls(&self, operation: &str) -> u64 {
        let counter = match operation {
            "list" => &self.0.calls_to_list,
            "create" => &self.0.calls_to_create,
            "update" => &self.0.calls_to_update,
            "delete" => &self.0.calls_to_delete,
            _ => unimplemented!(),
        };
        counter.load(Ordering::SeqCst)
    }

    fn result(&self) -> Result<(), ApiError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(ApiError::Status { status: 500 }),
        }
    }
}

#[async_trait]
impl ReservationApi for InMemoryReservations {
    async fn list(&self) -> Result<Vec<Reservation>, ApiError> {
        self.0.calls_to_list.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.snapshot())
    }

    async fn create(&self, draft: &Draft) -> Result<(), ApiError> {
        self.0.calls_to_create.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let id = self.0.next_id.fetch_add(1, Ordering::SeqCst);
        self.0.reservations.lock().unwrap().push(Reservation {
            id: id.into(),
            room: draft.room.clone(),
            scheduled_at: draft.scheduled_at.clone(),
        });
        Ok(())
    }

    async fn update(&self, id: &ReservationId, draft: &Draft) -> Result<(), ApiError> {
        self.0.calls_to_update.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let mut reservations = self.0.reservations.lock().unwrap();
        let reservation = reservations
            .iter_mut()
            .find(|reservation| &reservation.id == id)
            .ok_or(ApiError::Status { status: 404 })?;
        reservation.room = draft.room.clone();
        reservation.scheduled_at = draft.scheduled_at.clone();
        Ok(())
    }

    async fn delete(&self, id: &ReservationId) -> Result<(), ApiError> {
        self.0.calls_to_delete.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let mut reservations = self.0.reservations.lock().unwrap();
        let count = reservations.len();
        reservations.retain(|reservation| &reservation.id != id);
        if reservations.len() == count {
            return Err(ApiError::Status { status: 404 });
        }
        Ok(())
    }
}

pub fn reservation(id: i64, room: &str, scheduled_at: &str) -> Reservation {
    Reservation {
        id: id.into(),
        room: room.into(),
        scheduled_at: scheduled_at.into(),
    }
}

pub fn draft(room: &str, scheduled_at: &str) -> Draft {
    Draft {
        room: room.into(),
        scheduled_at: scheduled_at.into(),
    }
}

fn status_of(err: ApiError) -> StatusCode {
    match err {
        ApiError::Status { status } => {
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn list_reservations(State(service): State<InMemoryReservations>) -> impl IntoResponse {
    match service.list().await {
        Ok(reservations) => Json(reservations).into_response(),
        Err(err) => status_of(err).into_response(),
    }
}

async fn create_reservation(
    State(service): State<InMemoryReservations>,
    Json(draft): Json<Draft>,
) -> StatusCode {
    match service.create(&draft).await {
        Ok(()) => StatusCode::CREATED,
        Err(err) => status_of(err),
    }
}

async fn update_reservation(
    State(service): State<InMemoryReservations>,
    Path(id): Path<i64>,
    Json(draft): Json<Draft>,
) -> StatusCode {
    match service.update(&id.into(), &draft).await {
        Ok(()) => StatusCode::OK,
        Err(err) => status_of(err),
    }
}

async fn delete_reservation(
    State(service): State<InMemoryReservations>,
    Path(id): Path<i64>,
) -> StatusCode {
    match service.delete(&id.into()).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(err) => status_of(err),
    }
}

/// Serves the REST contract of the reservation service over `service` on a
/// random local port. Returns the base address and the server task.
pub async fn spawn_reservation_service(service: InMemoryReservations) -> (String, JoinHandle<()>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let app = Router::new()
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route(
            "/reservations/:id",
            put(update_reservation).delete(delete_reservation),
        )
        .with_state(service);

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{address}"), server)
}

/// A base address on which nothing is listening.
pub async fn unreachable_address() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}")
}
