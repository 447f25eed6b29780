//! Page envelope returned by the backend's paginated search endpoints.
//!
//! The raw body is decoded with every field optional and then checked, so a
//! malformed response is reported as a [`PageShapeError`] instead of being
//! rendered half-way.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Reasons a response body is not a usable page envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageShapeError {
    #[error("response body is empty")]
    EmptyBody,
    #[error("response is not a page envelope: {0}")]
    Malformed(String),
    #[error("page envelope has no `content` array")]
    MissingContent,
    #[error("page envelope has no `{0}` field")]
    MissingField(&'static str),
    #[error("page number {number} is out of range for {total_pages} pages")]
    OutOfRange { number: usize, total_pages: usize },
    #[error("record {index} could not be decoded: {message}")]
    Record { index: usize, message: String },
}

/// Position of a page within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_pages: usize,
    pub number: usize,
    pub first: bool,
    pub last: bool,
    pub total_elements: u64,
}

impl PageMeta {
    /// Builds metadata with `first`/`last` derived from `number`.
    pub fn new(total_pages: usize, number: usize, total_elements: u64) -> Self {
        Self {
            total_pages,
            number,
            first: number == 0,
            last: number + 1 >= total_pages,
            total_elements,
        }
    }
}

/// One page of records plus its position.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    content: Option<Vec<Value>>,
    total_pages: Option<usize>,
    number: Option<usize>,
    first: Option<bool>,
    last: Option<bool>,
    total_elements: Option<u64>,
}

impl PageEnvelope<Value> {
    /// Validates a decoded JSON body as a page envelope.
    pub fn from_json(body: Value) -> Result<Self, PageShapeError> {
        let raw: RawEnvelope =
            serde_json::from_value(body).map_err(|e| PageShapeError::Malformed(e.to_string()))?;

        let content = raw.content.ok_or(PageShapeError::MissingContent)?;
        let total_pages = raw
            .total_pages
            .ok_or(PageShapeError::MissingField("totalPages"))?;
        let number = raw.number.ok_or(PageShapeError::MissingField("number"))?;

        if total_pages > 0 && number >= total_pages {
            return Err(PageShapeError::OutOfRange {
                number,
                total_pages,
            });
        }

        let total_elements = raw.total_elements.unwrap_or(content.len() as u64);
        let meta = PageMeta::new(total_pages, number, total_elements);

        let inconsistent = raw.first.is_some_and(|first| first != meta.first)
            || raw.last.is_some_and(|last| last != meta.last);
        if inconsistent {
            log::warn!(
                "Page envelope flags disagree with page {number} of {total_pages}; using derived values"
            );
        }

        Ok(Self { content, meta })
    }

    /// Decodes every record into `E`, failing on the first bad one.
    pub fn decode<E: DeserializeOwned>(self) -> Result<PageEnvelope<E>, PageShapeError> {
        Ok(PageEnvelope {
            content: decode_records(self.content)?,
            meta: self.meta,
        })
    }
}

/// Decodes raw page content into typed records.
pub fn decode_records<E: DeserializeOwned>(content: Vec<Value>) -> Result<Vec<E>, PageShapeError> {
    content
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record).map_err(|e| PageShapeError::Record {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}
