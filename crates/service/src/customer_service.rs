use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use models::customer::{self, Customer, CustomerInput, RankedCustomer};
use models::reservation::Reservation;

/// Every customer, ordered by last name then first name.
pub async fn list_customers(db: &DatabaseConnection) -> Result<Vec<Customer>, ServiceError> {
    let customers = customer::all(db).await?;
    Ok(customers)
}

/// Get a customer by id; `NotFound` when the id has no row.
pub async fn get_customer(db: &DatabaseConnection, id: i32) -> Result<Customer, ServiceError> {
    let found = customer::get(db, id).await?;
    Ok(found)
}

/// Customers whose first name starts with the fragment.
pub async fn search_customers(
    db: &DatabaseConnection,
    fragment: &str,
) -> Result<Vec<Customer>, ServiceError> {
    let customers = customer::search(db, fragment).await?;
    Ok(customers)
}

/// Top ten customers by reservation count.
pub async fn best_customers(db: &DatabaseConnection) -> Result<Vec<RankedCustomer>, ServiceError> {
    let ranked = customer::best(db).await?;
    Ok(ranked)
}

/// Create and persist a new customer, returning it with its assigned id.
pub async fn create_customer(
    db: &DatabaseConnection,
    input: CustomerInput,
) -> Result<Customer, ServiceError> {
    let mut created = Customer::new(input);
    created.save(db).await?;
    Ok(created)
}

/// Update an existing customer's fields and persist them.
pub async fn update_customer(
    db: &DatabaseConnection,
    id: i32,
    input: CustomerInput,
) -> Result<Customer, ServiceError> {
    let mut found = customer::get(db, id).await?;
    found.set_first_name(input.first_name);
    found.set_last_name(input.last_name);
    found.set_phone(input.phone);
    found.set_notes(input.notes);
    found.save(db).await?;
    Ok(found)
}

/// All reservations held by a customer; `NotFound` when the customer is absent.
pub async fn customer_reservations(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Vec<Reservation>, ServiceError> {
    let found = customer::get(db, id).await?;
    let reservations = found.reservations(db).await?;
    Ok(reservations)
}
