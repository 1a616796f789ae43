//! Company autocomplete: field translation and suggestion normalization

use crate::search::filters::FilterVocabulary;
use crate::search::SearchError;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string accepted by the autocomplete route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteParams {
    pub field: Option<String>,
    pub query: Option<String>,
}

impl AutocompleteParams {
    /// Downstream query pairs with the field translated
    pub fn downstream_query(
        &self,
        vocabulary: &FilterVocabulary,
    ) -> Result<Vec<(String, String)>, SearchError> {
        let field = self
            .field
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .ok_or(SearchError::MissingParameter("field"))?;

        if !vocabulary.is_allowed(field) {
            return Err(SearchError::UnsupportedField(field.to_string()));
        }

        Ok(vec![
            ("field".to_string(), vocabulary.translate(field).to_string()),
            (
                "query".to_string(),
                self.query.clone().unwrap_or_default(),
            ),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub value: String,
}

impl Suggestion {
    fn from_upstream(entry: &Value) -> Option<Self> {
        let text = |key: &str| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        };

        if let Some(plain) = entry.as_str().filter(|plain| !plain.is_empty()) {
            return Some(Self {
                label: plain.to_string(),
                value: plain.to_string(),
            });
        }

        let fallback = text("query");
        let label = text("label");
        let value = text("value");
        match (label, value) {
            (Some(label), Some(value)) => Some(Self { label, value }),
            (Some(only), None) | (None, Some(only)) => Some(Self {
                label: only.clone(),
                value: only,
            }),
            (None, None) => fallback.map(|query| Self {
                label: query.clone(),
                value: query,
            }),
        }
    }
}

/// Suggestions under every alias the UI reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEnvelope {
    pub suggestions: Vec<Suggestion>,
}

impl Serialize for SuggestionEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("suggestions", &self.suggestions)?;
        map.serialize_entry("results", &self.suggestions)?;
        map.serialize_entry("data", &self.suggestions)?;
        map.serialize_entry("total", &self.suggestions.len())?;
        map.end()
    }
}

/// Normalize a downstream autocomplete response
///
/// Accepts a bare array or an object carrying the array under `data` or
/// `results`. Entries with no usable text are dropped.
pub fn normalize_suggestions(response: &Value) -> SuggestionEnvelope {
    let entries = response
        .as_array()
        .or_else(|| response.get("data").and_then(Value::as_array))
        .or_else(|| response.get("results").and_then(Value::as_array));

    SuggestionEnvelope {
        suggestions: entries
            .map(|entries| entries.iter().filter_map(Suggestion::from_upstream).collect())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filters::COMPANY_FILTERS;
    use serde_json::json;

    fn params(field: Option<&str>, query: Option<&str>) -> AutocompleteParams {
        AutocompleteParams {
            field: field.map(str::to_string),
            query: query.map(str::to_string),
        }
    }

    #[test]
    fn field_is_translated() {
        let query = params(Some("country"), Some("uni"))
            .downstream_query(&COMPANY_FILTERS)
            .unwrap();
        assert_eq!(
            query,
            vec![
                ("field".to_string(), "company_country_iso_alpha_2".to_string()),
                ("query".to_string(), "uni".to_string()),
            ]
        );
    }

    #[test]
    fn missing_field_is_rejected() {
        assert_eq!(
            params(None, Some("uni")).downstream_query(&COMPANY_FILTERS),
            Err(SearchError::MissingParameter("field"))
        );
        assert_eq!(
            params(Some("  "), None).downstream_query(&COMPANY_FILTERS),
            Err(SearchError::MissingParameter("field"))
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert_eq!(
            params(Some("shoe_size"), None).downstream_query(&COMPANY_FILTERS),
            Err(SearchError::UnsupportedField("shoe_size".to_string()))
        );
    }

    #[test]
    fn suggestions_fill_missing_label_or_value() {
        let envelope = normalize_suggestions(&json!([
            { "label": "United States", "value": "us" },
            { "value": "ca" },
            { "query": "mexico" },
            "germany",
            { "label": "" },
            42
        ]));

        assert_eq!(
            envelope.suggestions,
            vec![
                Suggestion {
                    label: "United States".into(),
                    value: "us".into(),
                },
                Suggestion {
                    label: "ca".into(),
                    value: "ca".into(),
                },
                Suggestion {
                    label: "mexico".into(),
                    value: "mexico".into(),
                },
                Suggestion {
                    label: "germany".into(),
                    value: "germany".into(),
                },
            ]
        );
    }

    #[test]
    fn wrapped_arrays_are_read() {
        let envelope = normalize_suggestions(&json!({ "data": [{ "value": "saas" }] }));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["suggestions"], value["results"]);
        assert_eq!(value["results"], value["data"]);
        assert_eq!(value["total"], 1);
    }

    #[test]
    fn unexpected_shape_is_empty() {
        assert!(normalize_suggestions(&json!({ "error": null }))
            .suggestions
            .is_empty());
    }
}
