//! Loan endpoints. Dates are always stamped server-side.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use bookfinder_http::{
    error::AppError,
    extract::{ApiJson, ApiPath},
};

use super::models::{BorrowRequest, BorrowingRecord};
use crate::library::SharedLibrary;

pub fn router(library: SharedLibrary) -> Router {
    Router::new()
        .route("/borrowing-records", get(list_records))
        .route("/borrowing-records/{id}", get(get_record))
        .route("/borrow", post(borrow))
        .route("/return/{record_id}", put(return_book))
        .with_state(library)
}

async fn list_records(State(library): State<SharedLibrary>) -> Json<Vec<BorrowingRecord>> {
    Json(library.list_records())
}

async fn get_record(
    State(library): State<SharedLibrary>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<BorrowingRecord>, AppError> {
    Ok(Json(library.record(id)?))
}

async fn borrow(
    State(library): State<SharedLibrary>,
    ApiJson(request): ApiJson<BorrowRequest>,
) -> Result<(StatusCode, Json<BorrowingRecord>), AppError> {
    let record = library.borrow(request)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn return_book(
    State(library): State<SharedLibrary>,
    ApiPath(record_id): ApiPath<u64>,
) -> Result<Json<BorrowingRecord>, AppError> {
    Ok(Json(library.return_today(record_id)?))
}
