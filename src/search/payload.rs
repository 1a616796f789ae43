//! Inbound search requests and the payload forwarded downstream

use crate::search::filters::{FilterSet, FilterVocabulary};
use crate::search::pagination::{PageWindow, Pagination, PaginationStyle};
use crate::search::SearchError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body accepted by the search routes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, alias = "page_size")]
    pub page_size: Option<u32>,
}

impl SearchRequest {
    /// Parse a raw request body; an empty body is an empty request
    pub fn from_slice(body: &[u8]) -> Result<Self, SearchError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| SearchError::MalformedBody(e.to_string()))
    }

    pub fn pagination(&self) -> Result<Pagination, SearchError> {
        Pagination::from_request(self.page, self.page_size)
    }
}

/// Payload consumed by the downstream search endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPayload {
    #[serde(flatten)]
    pub window: PageWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, Vec<String>>>,
}

/// Build the downstream payload for one search
///
/// Allow-listed, non-empty filters are copied under their downstream names.
/// A non-blank free-text name becomes a one-element array under the
/// vocabulary's name key. `filters` is left out when nothing was copied.
pub fn build_search_payload(
    vocabulary: &FilterVocabulary,
    filters: &FilterSet,
    name: Option<&str>,
    pagination: Pagination,
    style: PaginationStyle,
) -> SearchPayload {
    let mut translated = filters.translate(vocabulary);

    if let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) {
        translated.insert(vocabulary.name_key.to_string(), vec![name.to_string()]);
    }

    SearchPayload {
        window: pagination.window(style),
        filters: (!translated.is_empty()).then_some(translated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filters::{COMPANY_FILTERS, PEOPLE_FILTERS};
    use proptest::prelude::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> SearchRequest {
        SearchRequest::from_slice(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn country_filter_on_second_page() {
        let request = request(json!({
            "filters": { "country": ["US"] },
            "page": 2,
            "pageSize": 10
        }));

        let payload = build_search_payload(
            &COMPANY_FILTERS,
            &request.filters,
            request.name.as_deref(),
            request.pagination().unwrap(),
            PaginationStyle::Page,
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "page": 2,
                "page_size": 10,
                "filters": { "company_country_iso_alpha_2": ["US"] }
            })
        );
    }

    #[test]
    fn empty_filters_are_omitted() {
        let request = request(json!({ "filters": { "country": [], "industry": [] } }));

        let payload = build_search_payload(
            &COMPANY_FILTERS,
            &request.filters,
            None,
            request.pagination().unwrap(),
            PaginationStyle::Page,
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "page": 1, "page_size": 50 })
        );
    }

    #[test]
    fn name_becomes_single_element_array() {
        let payload = build_search_payload(
            &PEOPLE_FILTERS,
            &FilterSet::new(),
            Some("  Ada Lovelace "),
            Pagination::default(),
            PaginationStyle::Offset,
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "offset": 0,
                "limit": 50,
                "filters": { "full_name": ["Ada Lovelace"] }
            })
        );
    }

    #[test]
    fn blank_name_is_ignored() {
        let payload = build_search_payload(
            &COMPANY_FILTERS,
            &FilterSet::new(),
            Some("   "),
            Pagination::default(),
            PaginationStyle::Page,
        );
        assert!(payload.filters.is_none());
    }

    #[test]
    fn snake_case_page_size_is_accepted() {
        let request = request(json!({ "page_size": 20 }));
        assert_eq!(request.pagination().unwrap().page_size(), 20);
    }

    #[test]
    fn empty_body_is_default_request() {
        let request = SearchRequest::from_slice(b"").unwrap();
        assert_eq!(request.pagination().unwrap(), Pagination::default());
    }

    #[test]
    fn non_array_filter_is_malformed() {
        let result = SearchRequest::from_slice(br#"{"filters": {"country": "US"}}"#);
        assert!(matches!(result, Err(SearchError::MalformedBody(_))));
    }

    #[test]
    fn null_filters_are_treated_as_empty() {
        let request = request(json!({ "filters": null, "name": null }));
        assert_eq!(request.filters, FilterSet::new());
        assert!(request.name.is_none());
    }

    fn filter_key() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("country".to_string()),
            Just("industry".to_string()),
            Just("company_size".to_string()),
            Just("technology".to_string()),
            Just("job_title".to_string()),
            Just("city".to_string()),
            Just("business_id".to_string()),
            "[a-z_]{1,12}",
        ]
    }

    fn filter_set() -> impl Strategy<Value = FilterSet> {
        prop::collection::btree_map(
            filter_key(),
            prop::collection::vec("[A-Za-z ]{1,8}", 0..3),
            0..6,
        )
        .prop_map(FilterSet::from)
    }

    fn vocabulary() -> impl Strategy<Value = &'static FilterVocabulary> {
        prop_oneof![Just(&COMPANY_FILTERS), Just(&PEOPLE_FILTERS)]
    }

    proptest! {
        #[test]
        fn filters_present_only_for_allowed_non_empty_keys(
            vocabulary in vocabulary(),
            filters in filter_set(),
            name in proptest::option::of("[ A-Za-z]{0,10}"),
        ) {
            let payload = build_search_payload(
                vocabulary,
                &filters,
                name.as_deref(),
                Pagination::default(),
                PaginationStyle::Page,
            );

            let mut expected: BTreeMap<String, Vec<String>> = vocabulary
                .allowed
                .iter()
                .filter_map(|key| {
                    filters
                        .get(key)
                        .filter(|values| !values.is_empty())
                        .map(|values| (vocabulary.translate(key).to_string(), values.to_vec()))
                })
                .collect();
            if let Some(name) = name.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
                expected.insert(vocabulary.name_key.to_string(), vec![name.to_string()]);
            }

            match payload.filters {
                None => prop_assert!(expected.is_empty()),
                Some(actual) => {
                    prop_assert!(!actual.is_empty());
                    prop_assert_eq!(actual, expected);
                }
            }
        }
    }
}
