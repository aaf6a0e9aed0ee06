//! HTTP surface of the books module.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use shelf_http::{
    error::AppError,
    extract::{ValidJson, ValidPath, ValidQuery},
};
use shelf_kernel::{validation::into_details, FieldViolation};

use super::catalog::{Catalog, CatalogError};
use super::models::{Book, BookIdPath, BookRequest, Message, PublishDateQuery, RatingQuery};

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::not_found(err.to_string()),
        }
    }
}

/// Routes of the books module, bound to one catalog
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/books", get(read_all_books))
        .route("/books/", get(read_books_by_rating))
        .route("/books/publish/", get(read_books_by_publish_date))
        .route("/books/update_book", put(update_book))
        .route("/books/{book_id}", get(read_book).delete(delete_book))
        .route("/create-book", post(create_book))
        .with_state(catalog)
}

async fn read_all_books(State(catalog): State<Arc<Catalog>>) -> Json<Vec<Book>> {
    Json(catalog.list_all().await)
}

async fn read_book(
    State(catalog): State<Arc<Catalog>>,
    ValidPath(path): ValidPath<BookIdPath>,
) -> Result<Json<Book>, AppError> {
    tracing::debug!(book_id = path.book_id, "reading book");
    let book = catalog.get_by_id(path.book_id).await?;
    Ok(Json(book))
}

async fn read_books_by_rating(
    State(catalog): State<Arc<Catalog>>,
    ValidQuery(query): ValidQuery<RatingQuery>,
) -> Json<Vec<Book>> {
    Json(catalog.get_by_rating(query.book_rating).await)
}

async fn read_books_by_publish_date(
    State(catalog): State<Arc<Catalog>>,
    ValidQuery(query): ValidQuery<PublishDateQuery>,
) -> Json<Vec<Book>> {
    Json(catalog.get_by_published_date(query.publish_date).await)
}

async fn create_book(
    State(catalog): State<Arc<Catalog>>,
    ValidJson(request): ValidJson<BookRequest>,
) -> (StatusCode, Json<Message>) {
    catalog.create(request).await;
    (
        StatusCode::CREATED,
        Json(Message::new("Book added successfully!")),
    )
}

async fn update_book(
    State(catalog): State<Arc<Catalog>>,
    ValidJson(request): ValidJson<BookRequest>,
) -> Result<Json<Message>, AppError> {
    let id = request.id.ok_or_else(|| {
        AppError::validation(
            into_details(vec![FieldViolation::missing("id")]),
            "update requires the id of the book to replace",
        )
    })?;

    catalog.update(id, request).await?;
    Ok(Json(Message::new("Book updated successfully!")))
}

async fn delete_book(
    State(catalog): State<Arc<Catalog>>,
    ValidPath(path): ValidPath<BookIdPath>,
) -> Result<Json<Message>, AppError> {
    catalog.delete(path.book_id).await?;
    Ok(Json(Message::new("Book deleted successfully!")))
}
