//! HTTP handlers for the Books module.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookfinder_http::{
    error::AppError,
    extract::{ApiJson, ApiPath},
};

use super::models::{Book, BookInput};
use crate::library::SharedLibrary;

pub fn router(library: SharedLibrary) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/by-title/{title}", get(find_by_title))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(library)
}

async fn list_books(State(library): State<SharedLibrary>) -> Json<Vec<Book>> {
    Json(library.list_books())
}

async fn find_by_title(
    State(library): State<SharedLibrary>,
    ApiPath(title): ApiPath<String>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(library.book_by_title(&title)?))
}

async fn get_book(
    State(library): State<SharedLibrary>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(library.book(id)?))
}

async fn create_book(
    State(library): State<SharedLibrary>,
    ApiJson(input): ApiJson<BookInput>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    Ok((StatusCode::CREATED, Json(library.add_book(input)?)))
}

async fn update_book(
    State(library): State<SharedLibrary>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(input): ApiJson<BookInput>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(library.update_book(id, input)?))
}

async fn delete_book(
    State(library): State<SharedLibrary>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, AppError> {
    library.delete_book(id)?;
    Ok(StatusCode::NO_CONTENT)
}
