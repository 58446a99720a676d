use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::customer;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub num_guests: i32,
    pub start_at: DateTimeWithTimeZone,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Customer => Entity::belongs_to(customer::Entity).from(Column::CustomerId).to(customer::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A party's booking, owned by exactly one customer.
///
/// Field invariants are enforced at assignment time, before any save:
/// - `num_guests` is at least 1
/// - `customer_id` never changes once set (re-setting the same value is a no-op)
/// - `notes` normalizes absent/empty input to the empty string
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reservation {
    id: Option<i32>,
    customer_id: Option<i32>,
    num_guests: i32,
    start_at: DateTimeWithTimeZone,
    notes: String,
}

/// Caller-supplied fields for a new reservation. `start_at` is raw text and
/// goes through `parse_start_at`.
#[derive(Clone, Debug, Deserialize)]
pub struct ReservationInput {
    pub customer_id: i32,
    pub num_guests: i32,
    pub start_at: String,
    pub notes: Option<String>,
}

/// Parse a reservation start time, rejecting anything unparseable.
/// Accepts RFC 3339 or a bare `YYYY-MM-DD HH:MM` form (taken as UTC).
pub fn parse_start_at(raw: &str) -> Result<DateTimeWithTimeZone, ModelError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(Utc.from_utc_datetime(&naive).into());
        }
    }
    Err(ModelError::Validation(format!("not a valid start date: {raw}")))
}

impl Reservation {
    pub fn new(input: ReservationInput) -> Result<Self, ModelError> {
        let mut reservation = Reservation {
            id: None,
            customer_id: None,
            num_guests: 1,
            start_at: parse_start_at(&input.start_at)?,
            notes: String::new(),
        };
        reservation.set_customer_id(input.customer_id)?;
        reservation.set_num_guests(input.num_guests)?;
        reservation.set_notes(input.notes);
        Ok(reservation)
    }

    /// Map a persisted row into a reservation, going through the same
    /// setters as any other mutation so a bad row cannot slip past the
    /// invariants.
    pub fn from_model(row: Model) -> Result<Self, ModelError> {
        let mut reservation = Reservation {
            id: Some(row.id),
            customer_id: None,
            num_guests: 1,
            start_at: row.start_at,
            notes: String::new(),
        };
        reservation.set_customer_id(row.customer_id)?;
        reservation.set_num_guests(row.num_guests)?;
        reservation.set_notes(Some(row.notes));
        Ok(reservation)
    }

    pub fn id(&self) -> Option<i32> { self.id }
    pub fn customer_id(&self) -> Option<i32> { self.customer_id }
    pub fn num_guests(&self) -> i32 { self.num_guests }
    pub fn start_at(&self) -> DateTimeWithTimeZone { self.start_at }
    pub fn notes(&self) -> &str { &self.notes }

    /// At least one guest; on failure the field keeps its prior value.
    pub fn set_num_guests(&mut self, val: i32) -> Result<(), ModelError> {
        if val < 1 {
            return Err(ModelError::Validation("cannot have fewer than 1 guest".into()));
        }
        self.num_guests = val;
        Ok(())
    }

    /// Settable once; re-assigning the same value is a no-op.
    pub fn set_customer_id(&mut self, val: i32) -> Result<(), ModelError> {
        match self.customer_id {
            Some(current) if current != val => {
                Err(ModelError::Validation("cannot change customer id".into()))
            }
            _ => {
                self.customer_id = Some(val);
                Ok(())
            }
        }
    }

    pub fn set_start_at(&mut self, val: DateTimeWithTimeZone) {
        self.start_at = val;
    }

    /// Absent or empty notes normalize to the empty string; never fails.
    pub fn set_notes(&mut self, val: Option<String>) {
        self.notes = val.unwrap_or_default();
    }

    /// Human-readable start time, e.g. `March 1st 2021, 1:00 pm`.
    pub fn formatted_start_at(&self) -> String {
        let day = self.start_at.day();
        format!(
            "{} {}{} {}, {}",
            self.start_at.format("%B"),
            day,
            ordinal_suffix(day),
            self.start_at.format("%Y"),
            self.start_at.format("%-I:%M %P"),
        )
    }

    /// Insert when no id is set yet, update by id otherwise.
    /// On insert the generated key is written back onto the instance.
    pub async fn save(&mut self, db: &DatabaseConnection) -> Result<(), ModelError> {
        let customer_id = self
            .customer_id
            .ok_or_else(|| ModelError::Validation("reservation has no customer".into()))?;
        match self.id {
            None => {
                let inserted = ActiveModel {
                    customer_id: Set(customer_id),
                    num_guests: Set(self.num_guests),
                    start_at: Set(self.start_at),
                    notes: Set(self.notes.clone()),
                    ..Default::default()
                }
                .insert(db)
                .await
                .map_err(|e| ModelError::Db(e.to_string()))?;
                self.id = Some(inserted.id);
            }
            Some(id) => {
                // customer_id is immutable, so the update leaves it alone
                ActiveModel {
                    id: Set(id),
                    num_guests: Set(self.num_guests),
                    start_at: Set(self.start_at),
                    notes: Set(self.notes.clone()),
                    ..Default::default()
                }
                .update(db)
                .await
                .map_err(|e| ModelError::Db(e.to_string()))?;
            }
        }
        Ok(())
    }
}

/// All reservations for a customer, ordered by start time then id.
pub async fn for_customer(
    db: &DatabaseConnection,
    customer_id: i32,
) -> Result<Vec<Reservation>, ModelError> {
    let rows = Entity::find()
        .filter(Column::CustomerId.eq(customer_id))
        .order_by_asc(Column::StartAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    rows.into_iter().map(Reservation::from_model).collect()
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Reservation {
        Reservation::new(ReservationInput {
            customer_id: 5,
            num_guests: 2,
            start_at: "2021-03-01T13:00:00Z".into(),
            notes: None,
        })
        .unwrap()
    }

    #[test]
    fn num_guests_must_be_at_least_one() {
        let mut r = booking();
        assert!(r.set_num_guests(0).is_err());
        assert_eq!(r.num_guests(), 2);
        assert!(r.set_num_guests(-3).is_err());
        assert_eq!(r.num_guests(), 2);
        assert!(r.set_num_guests(1).is_ok());
        assert_eq!(r.num_guests(), 1);
    }

    #[test]
    fn new_rejects_zero_guests() {
        let err = Reservation::new(ReservationInput {
            customer_id: 5,
            num_guests: 0,
            start_at: "2021-03-01T13:00:00Z".into(),
            notes: None,
        });
        assert!(matches!(err, Err(ModelError::Validation(_))));
    }

    #[test]
    fn customer_id_is_settable_once() {
        let mut r = booking();
        // same value is a no-op
        assert!(r.set_customer_id(5).is_ok());
        assert_eq!(r.customer_id(), Some(5));
        // a different value is rejected and the field keeps its value
        assert!(r.set_customer_id(7).is_err());
        assert_eq!(r.customer_id(), Some(5));
    }

    #[test]
    fn unparseable_start_dates_are_rejected() {
        assert!(matches!(parse_start_at("not a date"), Err(ModelError::Validation(_))));
        assert!(matches!(parse_start_at("2021-13-45 99:99"), Err(ModelError::Validation(_))));
        assert!(parse_start_at("2021-03-01 13:00").is_ok());
        assert!(parse_start_at("2021-03-01T13:00:00Z").is_ok());
    }

    #[test]
    fn notes_normalize_like_customer_notes() {
        let mut r = booking();
        assert_eq!(r.notes(), "");
        r.set_notes(Some("anniversary".into()));
        assert_eq!(r.notes(), "anniversary");
        r.set_notes(None);
        assert_eq!(r.notes(), "");
    }

    #[test]
    fn start_time_formats_for_humans() {
        assert_eq!(booking().formatted_start_at(), "March 1st 2021, 1:00 pm");

        let mut r = booking();
        r.set_start_at(parse_start_at("2021-12-22T09:05:00Z").unwrap());
        assert_eq!(r.formatted_start_at(), "December 22nd 2021, 9:05 am");
    }

    #[test]
    fn ordinal_suffixes_cover_the_teens() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn rows_with_bad_guest_counts_do_not_map() {
        let res = Reservation::from_model(Model {
            id: 1,
            customer_id: 5,
            num_guests: 0,
            start_at: parse_start_at("2021-03-01 13:00").unwrap(),
            notes: String::new(),
        });
        assert!(matches!(res, Err(ModelError::Validation(_))));
    }
}
