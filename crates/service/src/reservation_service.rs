use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use models::customer;
use models::reservation::{self, Reservation, ReservationInput};

/// Create a reservation for an existing customer.
///
/// The customer is fetched first so a booking against a missing customer
/// surfaces as `NotFound` rather than a foreign-key failure.
pub async fn create_reservation(
    db: &DatabaseConnection,
    customer_id: i32,
    input: ReservationInput,
) -> Result<Reservation, ServiceError> {
    customer::get(db, customer_id).await?;
    let mut booking = Reservation::new(ReservationInput { customer_id, ..input })?;
    booking.save(db).await?;
    Ok(booking)
}

/// All reservations for a customer, ordered by start time.
pub async fn reservations_for_customer(
    db: &DatabaseConnection,
    customer_id: i32,
) -> Result<Vec<Reservation>, ServiceError> {
    let bookings = reservation::for_customer(db, customer_id).await?;
    Ok(bookings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer_service::create_customer;
    use crate::test_support::get_db;
    use models::customer::CustomerInput;
    use uuid::Uuid;

    #[tokio::test]
    async fn reservation_service_round_trip() -> Result<(), anyhow::Error> {
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: {}", e);
                return Ok(());
            }
        };

        let host = create_customer(
            &db,
            CustomerInput {
                first_name: "Grace".into(),
                last_name: format!("Svc-{}", Uuid::new_v4()),
                phone: None,
                notes: None,
            },
        )
        .await?;
        let customer_id = host.id().expect("saved");

        let booking = create_reservation(
            &db,
            customer_id,
            ReservationInput {
                customer_id,
                num_guests: 3,
                start_at: "2021-03-01T13:00:00Z".into(),
                notes: Some("birthday".into()),
            },
        )
        .await?;
        assert!(booking.id().is_some());

        let listed = reservations_for_customer(&db, customer_id).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].num_guests(), 3);
        assert_eq!(listed[0].notes(), "birthday");

        // bookings against a missing customer surface as NotFound
        let missing = create_reservation(
            &db,
            i32::MAX,
            ReservationInput {
                customer_id: i32::MAX,
                num_guests: 2,
                start_at: "2021-03-01T13:00:00Z".into(),
                notes: None,
            },
        )
        .await;
        assert!(missing.is_err());

        // invalid guest counts are rejected before any write
        let invalid = create_reservation(
            &db,
            customer_id,
            ReservationInput {
                customer_id,
                num_guests: 0,
                start_at: "2021-03-01T13:00:00Z".into(),
                notes: None,
            },
        )
        .await;
        assert!(matches!(invalid, Err(ServiceError::Model(_))));
        Ok(())
    }
}
