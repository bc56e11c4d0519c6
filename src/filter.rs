use crate::models::{Book, BookQuery};

/// A boolean query parameter such as `?reading=1`.
///
/// `"true"` and `"1"` mean true, `"false"` and `"0"` mean false (ASCII
/// case-insensitive). Anything else is kept as `Unrecognized`, which no book
/// satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolFilter {
    Is(bool),
    Unrecognized,
}

impl BoolFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "1" || raw.eq_ignore_ascii_case("true") {
            BoolFilter::Is(true)
        } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
            BoolFilter::Is(false)
        } else {
            BoolFilter::Unrecognized
        }
    }

    pub fn matches(self, value: bool) -> bool {
        self == BoolFilter::Is(value)
    }
}

/// Parsed form of [`BookQuery`]. Every supplied criterion narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub reading: Option<BoolFilter>,
    pub finished: Option<BoolFilter>,
    /// Already lowercased
    pub name: Option<String>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(reading) = self.reading {
            if !reading.matches(book.details.reading) {
                return false;
            }
        }

        if let Some(finished) = self.finished {
            if !finished.matches(book.finished) {
                return false;
            }
        }

        match &self.name {
            Some(needle) => book.details.name.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        BookFilter {
            reading: query.reading.as_deref().map(BoolFilter::parse),
            finished: query.finished.as_deref().map(BoolFilter::parse),
            name: query.name.map(|name| name.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookDetails;
    use chrono::Utc;

    fn book(name: &str, reading: bool, page_count: u32, read_page: u32) -> Book {
        let details = BookDetails {
            name: name.to_string(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count,
            read_page,
            reading,
        };
        Book::new(name.to_lowercase(), details, Utc::now())
    }

    fn query(reading: Option<&str>, finished: Option<&str>, name: Option<&str>) -> BookFilter {
        BookFilter::from(BookQuery {
            reading: reading.map(str::to_string),
            finished: finished.map(str::to_string),
            name: name.map(str::to_string),
        })
    }

    #[test]
    fn parses_boolean_spellings() {
        assert_eq!(BoolFilter::parse("true"), BoolFilter::Is(true));
        assert_eq!(BoolFilter::parse("TRUE"), BoolFilter::Is(true));
        assert_eq!(BoolFilter::parse("1"), BoolFilter::Is(true));
        assert_eq!(BoolFilter::parse("false"), BoolFilter::Is(false));
        assert_eq!(BoolFilter::parse("0"), BoolFilter::Is(false));
        assert_eq!(BoolFilter::parse("yes"), BoolFilter::Unrecognized);
        assert_eq!(BoolFilter::parse(""), BoolFilter::Unrecognized);
    }

    #[test]
    fn unrecognized_value_matches_nothing() {
        assert!(!BoolFilter::Unrecognized.matches(true));
        assert!(!BoolFilter::Unrecognized.matches(false));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = BookFilter::default();
        assert!(filter.matches(&book("Dune", false, 10, 2)));
        assert!(filter.matches(&book("Emma", true, 10, 10)));
    }

    #[test]
    fn filters_on_reading_and_finished() {
        let reading_unfinished = book("Dune", true, 10, 2);
        let idle_finished = book("Emma", false, 10, 10);

        let reading = query(Some("1"), None, None);
        assert!(reading.matches(&reading_unfinished));
        assert!(!reading.matches(&idle_finished));

        let finished = query(None, Some("true"), None);
        assert!(!finished.matches(&reading_unfinished));
        assert!(finished.matches(&idle_finished));

        let both = query(Some("false"), Some("0"), None);
        assert!(!both.matches(&reading_unfinished));
        assert!(!both.matches(&idle_finished));
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let filter = query(None, None, Some("DiCoDiNg"));

        assert!(filter.matches(&book("Kelas Dicoding Academy", false, 1, 0)));
        assert!(filter.matches(&book("dicoding", false, 1, 0)));
        assert!(!filter.matches(&book("Dune", false, 1, 0)));
    }
}
