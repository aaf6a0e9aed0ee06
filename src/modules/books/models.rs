use serde::{Deserialize, Serialize};
use shelf_kernel::{DecodeFields, FieldDecoder, Validate};

pub type BookId = i64;

pub const TITLE_MIN_CHARS: usize = 3;
pub const AUTHOR_MIN_CHARS: usize = 1;
pub const DESCRIPTION_MIN_CHARS: usize = 1;
pub const DESCRIPTION_MAX_CHARS: usize = 100;
/// Exclusive rating bounds; 5.0 is the highest accepted value.
pub const RATING_EXCLUSIVE_MIN: f64 = 0.0;
pub const RATING_EXCLUSIVE_MAX: f64 = 5.01;
/// Exclusive publication year bounds; 2000..=2025 is accepted.
pub const PUBLISHED_EXCLUSIVE_MIN: i32 = 1999;
pub const PUBLISHED_EXCLUSIVE_MAX: i32 = 2026;

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Assigned by the catalog on creation
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: f64,
    /// Publication year
    pub published_date: i32,
}

impl Book {
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
        rating: f64,
        published_date: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            description: description.into(),
            rating,
            published_date,
        }
    }

    /// Build a record from a request payload, ignoring any id it carries.
    pub fn from_request(id: BookId, request: BookRequest) -> Self {
        Self {
            id,
            title: request.title,
            author: request.author,
            description: request.description,
            rating: request.rating,
            published_date: request.published_date,
        }
    }
}

/// Payload for creating or replacing a book.
///
/// `id` is ignored on create and identifies the target on update. The
/// attribute bounds mirror the `*_CHARS` / `*_EXCLUSIVE_*` constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    #[serde(default)]
    pub id: Option<BookId>,
    #[validate(length(min = 3))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1, max = 100))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, exclusive_max = 5.01))]
    pub rating: f64,
    #[validate(range(exclusive_min = 1999, exclusive_max = 2026))]
    pub published_date: i32,
}

impl DecodeFields for BookRequest {
    fn decode_fields(fields: &mut FieldDecoder<'_>) -> Option<Self> {
        let id = fields.optional("id");
        let title = fields.required("title");
        let author = fields.required("author");
        let description = fields.required("description");
        let rating = fields.required("rating");
        let published_date = fields.required("published_date");

        Some(Self {
            id,
            title: title?,
            author: author?,
            description: description?,
            rating: rating?,
            published_date: published_date?,
        })
    }
}

/// `/books/{book_id}` path parameter.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct BookIdPath {
    #[validate(range(exclusive_min = 0))]
    pub book_id: BookId,
}

/// `?book_rating=` filter.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct RatingQuery {
    #[validate(range(exclusive_min = 0.0, exclusive_max = 5.01))]
    pub book_rating: f64,
}

/// `?publish_date=` filter.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PublishDateQuery {
    #[validate(range(exclusive_min = 1999, exclusive_max = 2026))]
    pub publish_date: i32,
}

/// Acknowledgement body returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
