use sea_orm::{
    entity::prelude::*, DatabaseConnection, FromQueryResult, JoinType, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::reservation;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// How many customers the ranking query returns at most.
const BEST_LIMIT: u64 = 10;

/// A customer of the restaurant, validated in memory and persisted on `save`.
///
/// Fields are private; every mutation goes through a setter so the notes
/// normalization cannot be bypassed, including when mapping rows back out of
/// the store.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Customer {
    id: Option<i32>,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    notes: String,
}

/// Caller-supplied fields for a new or edited customer.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl Customer {
    pub fn new(input: CustomerInput) -> Self {
        let mut customer = Customer {
            id: None,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            notes: String::new(),
        };
        customer.set_notes(input.notes);
        customer
    }

    /// Map a persisted row into a customer instance.
    pub fn from_model(row: Model) -> Self {
        let mut customer = Customer {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            notes: String::new(),
        };
        customer.set_notes(Some(row.notes));
        customer
    }

    pub fn id(&self) -> Option<i32> { self.id }
    pub fn first_name(&self) -> &str { &self.first_name }
    pub fn last_name(&self) -> &str { &self.last_name }
    pub fn phone(&self) -> Option<&str> { self.phone.as_deref() }
    pub fn notes(&self) -> &str { &self.notes }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_first_name(&mut self, val: String) { self.first_name = val; }
    pub fn set_last_name(&mut self, val: String) { self.last_name = val; }
    pub fn set_phone(&mut self, val: Option<String>) { self.phone = val; }

    /// Absent or empty notes normalize to the empty string; never fails.
    pub fn set_notes(&mut self, val: Option<String>) {
        self.notes = val.unwrap_or_default();
    }

    /// All reservations for this customer. An unsaved customer has none.
    pub async fn reservations(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Vec<reservation::Reservation>, ModelError> {
        match self.id {
            Some(id) => reservation::for_customer(db, id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Insert when no id is set yet, update by id otherwise.
    /// On insert the generated key is written back onto the instance.
    pub async fn save(&mut self, db: &DatabaseConnection) -> Result<(), ModelError> {
        match self.id {
            None => {
                let inserted = ActiveModel {
                    first_name: Set(self.first_name.clone()),
                    last_name: Set(self.last_name.clone()),
                    phone: Set(self.phone.clone()),
                    notes: Set(self.notes.clone()),
                    ..Default::default()
                }
                .insert(db)
                .await
                .map_err(|e| ModelError::Db(e.to_string()))?;
                self.id = Some(inserted.id);
            }
            Some(id) => {
                ActiveModel {
                    id: Set(id),
                    first_name: Set(self.first_name.clone()),
                    last_name: Set(self.last_name.clone()),
                    phone: Set(self.phone.clone()),
                    notes: Set(self.notes.clone()),
                }
                .update(db)
                .await
                .map_err(|e| ModelError::Db(e.to_string()))?;
            }
        }
        Ok(())
    }
}

/// A customer together with how many reservations they hold.
#[derive(Clone, Debug, Serialize)]
pub struct RankedCustomer {
    pub customer: Customer,
    pub num_reservations: i64,
}

#[derive(Debug, FromQueryResult)]
struct BestRow {
    id: i32,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    notes: String,
    num_reservations: i64,
}

/// All customers ordered by last name then first name.
pub async fn all(db: &DatabaseConnection) -> Result<Vec<Customer>, ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(Customer::from_model).collect())
}

/// Single customer by id; `NotFound` when no row matches.
pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Customer, ModelError> {
    let row = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or(ModelError::NotFound { entity: "customer", id })?;
    Ok(Customer::from_model(row))
}

/// Customers whose first name starts with `fragment`, ordered as in `all`.
/// LIKE wildcards in the fragment are escaped so user input stays inert.
pub async fn search(db: &DatabaseConnection, fragment: &str) -> Result<Vec<Customer>, ModelError> {
    let pattern = format!("{}%", escape_like(fragment));
    let rows = Entity::find()
        .filter(Column::FirstName.like(pattern))
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(Customer::from_model).collect())
}

/// Top customers by reservation count, at most ten. Customers with zero
/// reservations rank with count 0; ties break on ascending id.
pub async fn best(db: &DatabaseConnection) -> Result<Vec<RankedCustomer>, ModelError> {
    let rows = Entity::find()
        .select_only()
        .columns([Column::Id, Column::FirstName, Column::LastName, Column::Phone, Column::Notes])
        .column_as(reservation::Column::Id.count(), "num_reservations")
        .join_rev(JoinType::LeftJoin, reservation::Relation::Customer.def())
        .group_by(Column::Id)
        .group_by(Column::LastName)
        .group_by(Column::FirstName)
        .group_by(Column::Phone)
        .group_by(Column::Notes)
        .order_by_desc(reservation::Column::Id.count())
        .order_by_asc(Column::Id)
        .limit(BEST_LIMIT)
        .into_model::<BestRow>()
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|row| RankedCustomer {
            num_reservations: row.num_reservations,
            customer: Customer::from_model(Model {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
                phone: row.phone,
                notes: row.notes,
            }),
        })
        .collect())
}

fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Customer {
        Customer::new(CustomerInput {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: Some("555-0100".into()),
            notes: None,
        })
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(ada().full_name(), "Ada Lovelace");
    }

    #[test]
    fn absent_notes_normalize_to_empty() {
        let mut c = ada();
        assert_eq!(c.notes(), "");
        c.set_notes(Some(String::new()));
        assert_eq!(c.notes(), "");
        c.set_notes(None);
        assert_eq!(c.notes(), "");
    }

    #[test]
    fn non_empty_notes_kept_verbatim() {
        let mut c = ada();
        c.set_notes(Some("prefers window seat".into()));
        assert_eq!(c.notes(), "prefers window seat");
    }

    #[test]
    fn row_mapping_normalizes_notes() {
        let c = Customer::from_model(Model {
            id: 7,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            phone: None,
            notes: String::new(),
        });
        assert_eq!(c.id(), Some(7));
        assert_eq!(c.notes(), "");
    }

    #[test]
    fn new_customer_has_no_id() {
        assert_eq!(ada().id(), None);
    }

    #[test]
    fn like_escaping_neutralizes_wildcards() {
        assert_eq!(escape_like("Al"), "Al");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
