use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A book as held in the store and returned by `GET /books/{bookid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    #[serde(flatten)]
    pub details: BookDetails,
    pub finished: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(id: String, details: BookDetails, now: DateTime<Utc>) -> Self {
        Book {
            id,
            finished: details.is_finished(),
            details,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Installs new details, keeping `id` and `inserted_at`.
    pub fn revise(self, details: BookDetails, now: DateTime<Utc>) -> Self {
        Book {
            finished: details.is_finished(),
            details,
            updated_at: now,
            ..self
        }
    }
}

/// The caller-supplied fields of a stored book.
///
/// `year`, `author`, `summary` and `publisher` are free-form: whatever JSON
/// value the client sent is kept as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Value>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookDetails {
    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

/// Request body for `POST /books` and `PUT /books/{bookid}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<Value>,
    pub author: Option<Value>,
    pub summary: Option<Value>,
    pub publisher: Option<Value>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

/// A payload whose name is known to be present. Fields left as `None` were
/// not sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub name: String,
    pub year: Option<Value>,
    pub author: Option<Value>,
    pub summary: Option<Value>,
    pub publisher: Option<Value>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

impl BookChanges {
    /// Details of a new book: missing counts are 0 and `reading` is false.
    pub fn into_details(self) -> BookDetails {
        BookDetails {
            name: self.name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count.unwrap_or(0),
            read_page: self.read_page.unwrap_or(0),
            reading: self.reading.unwrap_or(false),
        }
    }

    /// Overlays these changes on `existing`. Fields not sent keep their
    /// stored value.
    pub fn merge_into(self, existing: &BookDetails) -> BookDetails {
        BookDetails {
            name: self.name,
            year: self.year.or_else(|| existing.year.clone()),
            author: self.author.or_else(|| existing.author.clone()),
            summary: self.summary.or_else(|| existing.summary.clone()),
            publisher: self.publisher.or_else(|| existing.publisher.clone()),
            page_count: self.page_count.unwrap_or(existing.page_count),
            read_page: self.read_page.unwrap_or(existing.read_page),
            reading: self.reading.unwrap_or(existing.reading),
        }
    }
}

/// The projection of a book used by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Value>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        BookSummary {
            id: book.id.clone(),
            name: book.details.name.clone(),
            publisher: book.details.publisher.clone(),
        }
    }
}

/// Raw query string of `GET /books`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    pub reading: Option<String>,
    pub finished: Option<String>,
    pub name: Option<String>,
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
