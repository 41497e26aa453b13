use std::sync::Arc;
use axum::{
    body::HttpBody,
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::Json,
    routing::get,
    BoxError, Router,
};
use serde_json::Value;
use crate::books::dto::{BookDto, BookRequest};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::core::command::Command;
use crate::core::controller::{
    AppState, json_rejection_to_server_error, json_to_server_error, path_rejection_to_server_error, ServerError,
};
use crate::core::domain::Identifiable;

pub const BOOKS_PATH: &str = "/api/books";

// generic over the request body so the same routes serve hyper and the lambda adapter
pub fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Send,
          B::Error: Into<BoxError> {
    Router::new()
        .route(BOOKS_PATH, get(list_books).post(add_book))
        .route(format!("{}/:id", BOOKS_PATH).as_str(),
               get(find_book_by_id).put(update_book).delete(remove_book))
        .with_state(state)
}

fn build_service(state: &AppState) -> Arc<dyn CatalogService> {
    Arc::clone(&state.catalog)
}

fn parse_book_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ServerError> {
    path.map(|Path(book_id)| book_id).map_err(path_rejection_to_server_error)
}

// book bodies must be json objects, serde would otherwise also accept arrays
fn parse_book_request(json: Result<Json<Value>, JsonRejection>) -> Result<BookRequest, ServerError> {
    let Json(value) = json.map_err(json_rejection_to_server_error)?;
    if !value.is_object() {
        return Err(json_to_server_error(<serde_json::Error as serde::de::Error>::custom("book request must be a json object")));
    }
    serde_json::from_value(value).map_err(json_to_server_error)
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let svc = build_service(&state);
    let res = ListBooksCommand::new(svc).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res.books))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>) -> Result<Json<BookDto>, ServerError> {
    let req = GetBookCommandRequest::new(parse_book_id(path)?);
    let svc = build_service(&state);
    let res = GetBookCommand::new(svc).execute(req).await?;
    Ok(Json(res.book))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<BookDto>), ServerError> {
    let book = parse_book_request(json)?;
    let svc = build_service(&state);
    let res = AddBookCommand::new(svc).execute(AddBookCommandRequest::new(book)).await?;
    let location = format!("{}/{}", BOOKS_PATH, res.book.id());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(res.book)))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<BookDto>, ServerError> {
    let book_id = parse_book_id(path)?;
    let book = parse_book_request(json)?;
    let svc = build_service(&state);
    let res = UpdateBookCommand::new(svc).execute(UpdateBookCommandRequest::new(book_id, book)).await?;
    Ok(Json(res.book))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>) -> Result<StatusCode, ServerError> {
    let req = RemoveBookCommandRequest::new(parse_book_id(path)?);
    let svc = build_service(&state);
    let _ = RemoveBookCommand::new(svc).execute(req).await?;
    Ok(StatusCode::NO_CONTENT)
}
