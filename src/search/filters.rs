//! Client filter vocabulary and its translation into downstream field names
//!
//! The UI speaks a small, stable set of filter keys (`country`,
//! `company_size`, `job_title`, ...). The downstream search API uses its own
//! field names. Each search kind owns a [`FilterVocabulary`] made of an
//! allow-list and a rename table; allow-listed keys without a rename entry
//! keep their client name.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Static allow-list and rename table for one search kind
#[derive(Debug)]
pub struct FilterVocabulary {
    /// Client keys that may reach the downstream payload
    pub allowed: &'static [&'static str],
    /// Client key to downstream key, for keys whose names differ
    pub renames: &'static [(&'static str, &'static str)],
    /// Downstream key receiving the free-text name search
    pub name_key: &'static str,
}

impl FilterVocabulary {
    /// Downstream name for a client key, falling back to the key itself
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(client, _)| *client == key)
            .map(|(_, downstream)| *downstream)
            .unwrap_or(key)
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        self.allowed.contains(&key)
    }
}

pub static COMPANY_FILTERS: FilterVocabulary = FilterVocabulary {
    allowed: &[
        "country",
        "region",
        "city",
        "company_size",
        "company_revenue",
        "company_age",
        "industry",
        "naics",
        "technology",
        "website_keywords",
    ],
    renames: &[
        ("country", "company_country_iso_alpha_2"),
        ("region", "company_region_country_code"),
        ("city", "city_region_country"),
        ("industry", "linkedin_category"),
        ("naics", "naics_category"),
        ("technology", "company_tech_stack_tech"),
    ],
    name_key: "company_name",
};

pub static PEOPLE_FILTERS: FilterVocabulary = FilterVocabulary {
    allowed: &[
        "country",
        "city",
        "job_title",
        "job_level",
        "job_department",
        "company_country",
        "company_size",
        "company_revenue",
        "industry",
        "business_id",
    ],
    renames: &[
        ("country", "country_code"),
        ("city", "city_region_country"),
        ("company_country", "company_country_code"),
        ("industry", "linkedin_category"),
    ],
    name_key: "full_name",
};

/// Filters as sent by the UI: named arrays of strings, every key optional
///
/// A `null` value counts as an absent key and a `null` set as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, Vec<String>>);

impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, Option<Vec<String>>>>::deserialize(deserializer)?;
        Ok(Self(
            raw.unwrap_or_default()
                .into_iter()
                .filter_map(|(key, values)| values.map(|values| (key, values)))
                .collect(),
        ))
    }
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, values: Vec<String>) -> Self {
        self.0.insert(key.into(), values);
        self
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Translate the allow-listed, non-empty entries into downstream names
    pub fn translate(&self, vocabulary: &FilterVocabulary) -> BTreeMap<String, Vec<String>> {
        vocabulary
            .allowed
            .iter()
            .filter_map(|key| {
                self.get(key)
                    .filter(|values| !values.is_empty())
                    .map(|values| (vocabulary.translate(key).to_string(), values.to_vec()))
            })
            .collect()
    }
}

impl From<BTreeMap<String, Vec<String>>> for FilterSet {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}
