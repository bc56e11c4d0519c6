use axum::{
    extract::{FromRequest, FromRequestParts, Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;
use std::error::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::error::{Action, BookError};
use crate::filter::BookFilter;
use crate::id::generate_id;
use crate::models::{Book, BookPayload, BookQuery, BookSummary};
use crate::repo::{BookRepo, UpdateOutcome};
use crate::response::ApiResponse;
use crate::validation::{new_details, validate, ValidationError};

#[derive(Clone)]
struct AppState<R> {
    repo: R,
}

/// JSON body extractor that answers malformed input with a `fail` envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(BookError))]
struct Payload<T>(T);

/// Query string extractor that answers malformed input with a `fail` envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BookError))]
struct Filters<T>(T);

pub fn build_app<R>(repo: R) -> Router
where
    R: BookRepo + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/books",
            get(list_books::<R>)
                .post(insert_book::<R>)
                .fallback(not_found),
        )
        .route(
            "/books/{bookid}",
            get(get_book::<R>)
                .put(update_book::<R>)
                .delete(delete_book::<R>)
                .fallback(not_found),
        )
        .fallback(not_found)
        .with_state(AppState { repo })
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn list_books<R>(
    State(state): State<AppState<R>>,
    Filters(query): Filters<BookQuery>,
) -> ApiResponse
where
    R: BookRepo,
{
    let books = match state.repo.list_books(BookFilter::from(query)).await {
        Ok(books) => books,
        Err(err) => {
            error!("Failed to list books, responding with an empty list: {}", err);
            Vec::new()
        }
    };

    info!("Retrieved {} books from the store", books.len());

    let books: Vec<BookSummary> = books.iter().map(BookSummary::from).collect();
    ApiResponse::success(StatusCode::OK).with_data(json!({ "books": books }))
}

async fn get_book<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<ApiResponse, BookError>
where
    R: BookRepo,
{
    let book = state
        .repo
        .get_book(id.clone())
        .await
        .map_err(internal_error(Action::Read))?;

    match book {
        Some(book) => {
            info!("Retrieved book from the store: {:?}", book);
            Ok(ApiResponse::success(StatusCode::OK).with_data(json!({ "book": book })))
        }
        None => {
            warn!("No book found in the store with ID: {}", id);
            Err(BookError::NotFound {
                action: Action::Read,
            })
        }
    }
}

async fn insert_book<R>(
    State(state): State<AppState<R>>,
    Payload(payload): Payload<BookPayload>,
) -> Result<ApiResponse, BookError>
where
    R: BookRepo,
{
    let details = validate(payload)
        .and_then(new_details)
        .map_err(rejected(Action::Create))?;

    let book = Book::new(generate_id(), details, Utc::now());
    let id = book.id.clone();

    state
        .repo
        .insert_book(book)
        .await
        .map_err(internal_error(Action::Create))?;

    let stored = state
        .repo
        .get_book(id.clone())
        .await
        .map_err(internal_error(Action::Create))?;

    if stored.is_none() {
        error!("Book with ID {} is missing from the store after insert", id);
        return Err(BookError::PersistFailure {
            action: Action::Create,
        });
    }

    info!("Inserted book into the store with ID: {}", id);

    Ok(ApiResponse::success(StatusCode::CREATED)
        .with_message("Buku berhasil ditambahkan")
        .with_data(json!({ "bookId": id })))
}

// Validation runs before the ID lookup, so an invalid payload is a 400 even
// for an unknown ID.
async fn update_book<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Payload(payload): Payload<BookPayload>,
) -> Result<ApiResponse, BookError>
where
    R: BookRepo,
{
    let changes = validate(payload).map_err(rejected(Action::Update))?;

    let outcome = state
        .repo
        .update_book(id.clone(), changes, Utc::now())
        .await
        .map_err(internal_error(Action::Update))?;

    match outcome {
        UpdateOutcome::Updated(book) => {
            info!("Updated book in the store: {:?}", book);
            Ok(ApiResponse::success(StatusCode::OK).with_message("Buku berhasil diperbarui"))
        }
        UpdateOutcome::NotFound => {
            warn!("Tried to update non-existent book with ID: {}", id);
            Err(BookError::NotFound {
                action: Action::Update,
            })
        }
        UpdateOutcome::Rejected(reason) => Err(rejected(Action::Update)(reason)),
    }
}

async fn delete_book<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<ApiResponse, BookError>
where
    R: BookRepo,
{
    let deleted = state
        .repo
        .delete_book(id.clone())
        .await
        .map_err(internal_error(Action::Delete))?;

    if deleted {
        info!("Deleted book from the store with ID: {}", id);
        Ok(ApiResponse::success(StatusCode::OK).with_message("Buku berhasil dihapus"))
    } else {
        warn!("Tried to delete non-existent book with ID: {}", id);
        Err(BookError::NotFound {
            action: Action::Delete,
        })
    }
}

async fn not_found() -> ApiResponse {
    ApiResponse::fail(StatusCode::NOT_FOUND, "Page not found")
}

/// Log a refused payload and turn it into a 400 response
fn rejected(action: Action) -> impl FnOnce(ValidationError) -> BookError {
    move |reason| {
        warn!("Refused book payload during {:?}: {}", action, reason);
        BookError::invalid(action)(reason)
    }
}

/// Log a repository error and turn it into a 500 response
fn internal_error<E>(action: Action) -> impl FnOnce(E) -> BookError
where
    E: Error,
{
    move |err| {
        error!("Book store failed during {:?}: {}", action, err);
        BookError::PersistFailure { action }
    }
}
