//! The order-creation endpoint.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use common::AppError;
use domain::{CreateOrder, OrderItem, OrderRepository, OrderService};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::validation::{fits_u32, not_blank, violations};

/// Body of the 405 response.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only POST method is supported";

/// Shared application state accessible from all handlers.
pub struct AppState<R: OrderRepository> {
    pub order_service: OrderService<R>,
}

// -- Request types --

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    #[validate(
        required(message = "must not be null"),
        custom(function = "not_blank")
    )]
    pub customer_id: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "must not be empty"),
        length(min = 1, message = "must not be empty"),
        nested
    )]
    pub items: Option<Vec<CreateOrderItemRequest>>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    #[validate(custom(function = "not_blank"))]
    pub product_id: String,

    #[validate(
        range(min = 1, message = "must be greater than 0"),
        custom(function = "fits_u32")
    )]
    pub quantity: i64,

    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
}

impl CreateOrderRequest {
    /// Checks the declared constraints and converts into a domain command.
    pub fn into_command(self) -> Result<CreateOrder, AppError> {
        self.validate()
            .map_err(|errors| AppError::Validation(violations(&errors)))?;

        let items = self
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                let quantity =
                    u32::try_from(item.quantity).map_err(|e| AppError::internal("mapping", e))?;
                Ok(OrderItem::new(item.product_id, quantity, item.price))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(CreateOrder::new(
            self.customer_id.unwrap_or_default(),
            items,
        ))
    }
}

// -- Handlers --

/// POST /order — validate the body, create the order, return it.
///
/// The body is taken as raw bytes so that malformed JSON is reported through
/// [`ApiError::MalformedBody`] instead of axum's extractor rejection.
/// A body that cannot be read at all (e.g. over the size limit) is reported
/// through [`ApiError::UnreadableBody`] so it still gets a JSON body.
#[tracing::instrument(skip(state, body))]
pub async fn create<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let body = body.map_err(ApiError::UnreadableBody)?;
    let request: CreateOrderRequest =
        serde_json::from_slice(&body).map_err(ApiError::MalformedBody)?;

    let cmd = request.into_command()?;
    let order = state.order_service.create(cmd).await?;

    let body = serde_json::to_value(&order).map_err(|e| AppError::internal("json", e))?;

    metrics::counter!("order_requests_total", "status" => StatusCode::CREATED.as_u16().to_string())
        .increment(1);
    Ok((StatusCode::CREATED, Json(body)))
}

/// OPTIONS /order — CORS preflight; headers are added by the CORS policy.
pub async fn preflight() -> StatusCode {
    metrics::counter!("order_requests_total", "status" => StatusCode::OK.as_u16().to_string())
        .increment(1);
    StatusCode::OK
}

/// Any other method on /order.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    metrics::counter!(
        "order_requests_total",
        "status" => StatusCode::METHOD_NOT_ALLOWED.as_u16().to_string()
    )
    .increment(1);
    (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}
