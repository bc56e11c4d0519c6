use thiserror::Error;

use crate::models::{BookChanges, BookDetails, BookPayload};

/// Reason a payload was refused. The text is the user-facing suffix of the
/// response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Mohon isi nama buku")]
    MissingName,

    #[error("readPage tidak boleh lebih besar dari pageCount")]
    InvalidPageRange,
}

pub fn require_name(name: Option<String>) -> Result<String, ValidationError> {
    name.ok_or(ValidationError::MissingName)
}

pub fn check_page_range(page_count: u32, read_page: u32) -> Result<(), ValidationError> {
    if read_page > page_count {
        return Err(ValidationError::InvalidPageRange);
    }
    Ok(())
}

/// Checks the name first, then the page range when the payload carries both
/// counts. Needs no stored state, so it runs before any ID lookup.
pub fn validate(payload: BookPayload) -> Result<BookChanges, ValidationError> {
    let name = require_name(payload.name)?;
    if let (Some(page_count), Some(read_page)) = (payload.page_count, payload.read_page) {
        check_page_range(page_count, read_page)?;
    }

    Ok(BookChanges {
        name,
        year: payload.year,
        author: payload.author,
        summary: payload.summary,
        publisher: payload.publisher,
        page_count: payload.page_count,
        read_page: payload.read_page,
        reading: payload.reading,
    })
}

/// Details for a new book, with the page range checked after defaults apply.
pub fn new_details(changes: BookChanges) -> Result<BookDetails, ValidationError> {
    let details = changes.into_details();
    check_page_range(details.page_count, details.read_page)?;
    Ok(details)
}

/// `existing` with `changes` merged over it, with the page range checked on
/// the merged counts.
pub fn merged_details(
    changes: BookChanges,
    existing: &BookDetails,
) -> Result<BookDetails, ValidationError> {
    let details = changes.merge_into(existing);
    check_page_range(details.page_count, details.read_page)?;
    Ok(details)
}
