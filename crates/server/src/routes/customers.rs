use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use models::customer::{Customer, CustomerInput, RankedCustomer};
use service::customer_service;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Serialize)]
pub struct CustomerDto {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub notes: String,
}

impl From<&Customer> for CustomerDto {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id(),
            first_name: c.first_name().to_string(),
            last_name: c.last_name().to_string(),
            full_name: c.full_name(),
            phone: c.phone().map(str::to_string),
            notes: c.notes().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct RankedCustomerDto {
    #[serde(flatten)]
    pub customer: CustomerDto,
    pub num_reservations: i64,
}

impl From<&RankedCustomer> for RankedCustomerDto {
    fn from(r: &RankedCustomer) -> Self {
        Self { customer: CustomerDto::from(&r.customer), num_reservations: r.num_reservations }
    }
}

#[derive(Deserialize, Default)]
pub struct ListParams {
    pub search: Option<String>,
}

/// List every customer, or prefix-search first names with `?search=`.
pub async fn list_customers(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CustomerDto>>, ApiError> {
    let customers = match params.search.as_deref() {
        Some(fragment) => customer_service::search_customers(&state.db, fragment).await?,
        None => customer_service::list_customers(&state.db).await?,
    };
    Ok(Json(customers.iter().map(CustomerDto::from).collect()))
}

/// Top ten customers by reservation count.
pub async fn best_customers(
    State(state): State<ServerState>,
) -> Result<Json<Vec<RankedCustomerDto>>, ApiError> {
    let ranked = customer_service::best_customers(&state.db).await?;
    Ok(Json(ranked.iter().map(RankedCustomerDto::from).collect()))
}

pub async fn get_customer(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<CustomerDto>, ApiError> {
    let found = customer_service::get_customer(&state.db, id).await?;
    Ok(Json(CustomerDto::from(&found)))
}

pub async fn create_customer(
    State(state): State<ServerState>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<CustomerDto>, ApiError> {
    let created = customer_service::create_customer(&state.db, input).await?;
    Ok(Json(CustomerDto::from(&created)))
}

pub async fn update_customer(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<CustomerDto>, ApiError> {
    let updated = customer_service::update_customer(&state.db, id, input).await?;
    Ok(Json(CustomerDto::from(&updated)))
}
