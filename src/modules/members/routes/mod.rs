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

use super::models::{Member, MemberInput};
use crate::library::SharedLibrary;

pub fn router(library: SharedLibrary) -> Router {
    Router::new()
        .route("/members", get(list_members).post(create_member))
        .route(
            "/members/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
        .with_state(library)
}

async fn list_members(State(library): State<SharedLibrary>) -> Json<Vec<Member>> {
    Json(library.list_members())
}

async fn get_member(
    State(library): State<SharedLibrary>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<Member>, AppError> {
    Ok(Json(library.member(id)?))
}

async fn create_member(
    State(library): State<SharedLibrary>,
    ApiJson(input): ApiJson<MemberInput>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    Ok((StatusCode::CREATED, Json(library.add_member(input)?)))
}

async fn update_member(
    State(library): State<SharedLibrary>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(input): ApiJson<MemberInput>,
) -> Result<Json<Member>, AppError> {
    Ok(Json(library.update_member(id, input)?))
}

async fn delete_member(
    State(library): State<SharedLibrary>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, AppError> {
    library.delete_member(id)?;
    Ok(StatusCode::NO_CONTENT)
}
