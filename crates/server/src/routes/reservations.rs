use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use models::reservation::{Reservation, ReservationInput};
use service::{customer_service, reservation_service};

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Serialize)]
pub struct ReservationDto {
    pub id: Option<i32>,
    pub customer_id: Option<i32>,
    pub num_guests: i32,
    pub start_at: DateTime<FixedOffset>,
    pub start_display: String,
    pub notes: String,
}

impl From<&Reservation> for ReservationDto {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id(),
            customer_id: r.customer_id(),
            num_guests: r.num_guests(),
            start_at: r.start_at(),
            start_display: r.formatted_start_at(),
            notes: r.notes().to_string(),
        }
    }
}

/// Booking fields as posted by a caller; the customer comes from the path.
#[derive(Deserialize)]
pub struct NewReservation {
    pub num_guests: i32,
    pub start_at: String,
    pub notes: Option<String>,
}

/// A customer's reservations, 404 when the customer does not exist.
pub async fn list_for_customer(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ReservationDto>>, ApiError> {
    let bookings = customer_service::customer_reservations(&state.db, id).await?;
    Ok(Json(bookings.iter().map(ReservationDto::from).collect()))
}

pub async fn create_reservation(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<NewReservation>,
) -> Result<Json<ReservationDto>, ApiError> {
    let booking = reservation_service::create_reservation(
        &state.db,
        id,
        ReservationInput {
            customer_id: id,
            num_guests: input.num_guests,
            start_at: input.start_at,
            notes: input.notes,
        },
    )
    .await?;
    Ok(Json(ReservationDto::from(&booking)))
}
