use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

const LOCAL_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Identifier assigned by the reservation service. Numbers and strings are
/// both accepted and sent back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReservationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationId::Number(id) => write!(f, "{id}"),
            ReservationId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ReservationId {
    fn from(id: i64) -> Self {
        ReservationId::Number(id)
    }
}

impl From<&str> for ReservationId {
    fn from(id: &str) -> Self {
        ReservationId::Text(id.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    #[serde(alias = "sala")]
    pub room: String,
    #[serde(alias = "dataHora")]
    pub scheduled_at: String,
}

impl Reservation {
    /// Parses `scheduled_at` as a local date and time. Only used for display,
    /// the stored value is never rewritten.
    pub fn scheduled_at_local(&self) -> Option<NaiveDateTime> {
        LOCAL_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&self.scheduled_at, format).ok())
    }
}

/// Unsaved field values of the reservation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub room: String,
    pub scheduled_at: String,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.room.is_empty() && self.scheduled_at.is_empty()
    }
}

impl From<&Reservation> for Draft {
    fn from(reservation: &Reservation) -> Self {
        Self {
            room: reservation.room.clone(),
            scheduled_at: reservation.scheduled_at.clone(),
        }
    }
}
