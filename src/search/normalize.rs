//! Reshaping of downstream search responses into the client envelope
//!
//! Downstream records are renamed field by field; the record list is then
//! exposed under every alias the UI consumers read (`businesses` or `people`,
//! `results`, `data`). Missing lists and fields are tolerated: an absent
//! `content` is an empty page and an absent field is `null`.

use crate::search::pagination::{total_pages, Pagination};
use crate::search::SearchKind;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

/// Downstream response field names
pub mod upstream_fields {
    pub const CONTENT: &str = "content";
    pub const TOTAL_ELEMENTS: &str = "total_elements";
    pub const PAGE_NUMBER: &str = "page_number";
    pub const PAGE_SIZE: &str = "page_size";
    pub const TOTAL_PAGES: &str = "total_pages";
}

/// Nested postal address of a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// A company as the UI expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessRecord {
    pub id: Option<String>,
    pub business_id: Option<String>,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub employee_range: Option<String>,
    pub revenue_range: Option<String>,
    pub address: Address,
    pub logo: Option<String>,
    pub logo_url: Option<String>,
    pub linkedin: Option<String>,
    pub linkedin_url: Option<String>,
}

impl BusinessRecord {
    pub fn from_upstream(record: &Map<String, Value>) -> Self {
        let id = string_field(record, "business_id");
        let logo = string_field(record, "logo");
        let linkedin = string_field(record, "linkedin_profile");
        Self {
            business_id: id.clone(),
            id,
            name: string_field(record, "name"),
            domain: string_field(record, "domain"),
            website: string_field(record, "website"),
            description: string_field(record, "business_description"),
            industry: string_field(record, "linkedin_industry_category"),
            employee_range: string_field(record, "number_of_employees_range"),
            revenue_range: string_field(record, "yearly_revenue_range"),
            address: Address {
                street: string_field(record, "street"),
                city: string_field(record, "city_name"),
                region: string_field(record, "region_name"),
                country: string_field(record, "country_name"),
                postal_code: string_field(record, "zip_code"),
            },
            logo_url: logo.clone(),
            logo,
            linkedin_url: linkedin.clone(),
            linkedin,
        }
    }
}

/// A person as the UI expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    pub id: Option<String>,
    pub prospect_id: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub job_title: Option<String>,
    pub job_level: Option<String>,
    pub job_department: Option<String>,
    pub company_name: Option<String>,
    pub business_id: Option<String>,
    pub company_website: Option<String>,
    pub address: Address,
    pub linkedin: Option<String>,
    pub linkedin_url: Option<String>,
}

impl PersonRecord {
    pub fn from_upstream(record: &Map<String, Value>) -> Self {
        let id = string_field(record, "prospect_id");
        let full_name = string_field(record, "full_name");
        let job_title = string_field(record, "job_title");
        let linkedin = string_field(record, "linkedin");
        Self {
            prospect_id: id.clone(),
            id,
            name: full_name.clone(),
            full_name,
            first_name: string_field(record, "first_name"),
            last_name: string_field(record, "last_name"),
            title: job_title.clone(),
            job_title,
            job_level: string_field(record, "job_level"),
            job_department: string_field(record, "job_department"),
            company_name: string_field(record, "company_name"),
            business_id: string_field(record, "business_id"),
            company_website: string_field(record, "company_website"),
            address: Address {
                city: string_field(record, "city"),
                region: string_field(record, "region_name"),
                country: string_field(record, "country_name"),
                ..Address::default()
            },
            linkedin_url: linkedin.clone(),
            linkedin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Business(BusinessRecord),
    Person(PersonRecord),
}

/// Client envelope for one page of search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEnvelope {
    pub kind: SearchKind,
    pub records: Vec<Record>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl Serialize for SearchEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry(self.kind.envelope_key(), &self.records)?;
        map.serialize_entry("results", &self.records)?;
        map.serialize_entry("data", &self.records)?;
        map.serialize_entry("total", &self.total)?;
        map.serialize_entry("page", &self.page)?;
        map.serialize_entry("page_size", &self.page_size)?;
        map.serialize_entry("total_pages", &self.total_pages)?;
        map.end()
    }
}

/// Normalize a downstream search response for the requested page
pub fn normalize_search_response(
    kind: SearchKind,
    response: &Value,
    requested: Pagination,
) -> SearchEnvelope {
    use upstream_fields::*;

    let records: Vec<Record> = response
        .get(CONTENT)
        .and_then(Value::as_array)
        .map(|content| {
            content
                .iter()
                .filter_map(Value::as_object)
                .map(|record| kind.normalize_record(record))
                .collect()
        })
        .unwrap_or_default();

    let total = response
        .get(TOTAL_ELEMENTS)
        .and_then(Value::as_u64)
        .unwrap_or(records.len() as u64);
    let page = u32_field(response, PAGE_NUMBER)
        .filter(|page| *page > 0)
        .unwrap_or_else(|| requested.page());
    let page_size = u32_field(response, PAGE_SIZE)
        .filter(|size| *size > 0)
        .unwrap_or_else(|| requested.page_size());
    let total_pages = response
        .get(TOTAL_PAGES)
        .and_then(Value::as_u64)
        .unwrap_or_else(|| total_pages(total, page_size));

    SearchEnvelope {
        kind,
        records,
        total,
        page,
        page_size,
        total_pages,
    }
}

/// String value of a field; numbers are rendered, anything else is absent
fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

fn u32_field(response: &Value, key: &str) -> Option<u32> {
    response
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok())
}
