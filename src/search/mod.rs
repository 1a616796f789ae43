//! Field mapping and response normalization for company and people search
//!
//! Everything in this module is a pure transform: client filters and
//! pagination go in, a downstream payload comes out; a downstream response
//! goes in, the aliased client envelope comes out.

pub mod autocomplete;
pub mod filters;
pub mod normalize;
pub mod pagination;
pub mod payload;

use filters::{FilterVocabulary, COMPANY_FILTERS, PEOPLE_FILTERS};
use normalize::{BusinessRecord, PersonRecord, Record};
use pagination::PaginationStyle;
use serde_json::{Map, Value};
use thiserror::Error;

pub use autocomplete::{normalize_suggestions, AutocompleteParams, SuggestionEnvelope};
pub use filters::FilterSet;
pub use normalize::{normalize_search_response, SearchEnvelope};
pub use pagination::{PageNumber, PageSize, Pagination};
pub use payload::{build_search_payload, SearchPayload, SearchRequest};

/// The searchable entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Companies,
    People,
}

impl SearchKind {
    pub fn vocabulary(self) -> &'static FilterVocabulary {
        match self {
            Self::Companies => &COMPANY_FILTERS,
            Self::People => &PEOPLE_FILTERS,
        }
    }

    pub fn pagination_style(self) -> PaginationStyle {
        match self {
            Self::Companies => PaginationStyle::Page,
            Self::People => PaginationStyle::Offset,
        }
    }

    /// Envelope key holding the records alongside `results` and `data`
    pub fn envelope_key(self) -> &'static str {
        match self {
            Self::Companies => "businesses",
            Self::People => "people",
        }
    }

    pub fn normalize_record(self, record: &Map<String, Value>) -> Record {
        match self {
            Self::Companies => Record::Business(BusinessRecord::from_upstream(record)),
            Self::People => Record::Person(PersonRecord::from_upstream(record)),
        }
    }
}

/// Client request problems detected before anything is forwarded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("page must be at least 1")]
    InvalidPage,

    #[error("pageSize must be at least 1")]
    InvalidPageSize,

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unsupported autocomplete field: {0}")]
    UnsupportedField(String),
}
