use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::cfg;

#[rustfmt::skip]
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid SheetDB endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("{0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to encode fixture records: {0}")]
    FixtureEncodingFailed(#[from] serde_json::Error),
}

/// One lead row as exposed by the sheet. Every column is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRecord {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone_no: Option<String>,
    pub course_name: Option<String>,
    pub page_variant: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub submit_at: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SheetQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl SheetQuery {
    /// Only the parameters the caller actually supplied, in a stable order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sort_by", sort_by.clone()));
        }
        if let Some(sort_order) = &self.sort_order {
            pairs.push(("sort_order", sort_order.clone()));
        }
        pairs
    }
}

/// Records served for local development when no SheetDB API id is set.
#[must_use]
pub fn fixture_records() -> Vec<SheetRecord> {
    vec![
        fixture_record("test@example.com", "Test User", "01012345678", "Test Course", "a", "test", "2025-05-18 12:00:00"),
        fixture_record("sample@example.com", "Sample User", "01098765432", "Sample Course", "b", "sample", "2025-05-17 15:30:00"),
    ]
}

fn fixture_record(
    email: &str,
    name: &str,
    phone_no: &str,
    course_name: &str,
    page_variant: &str,
    utm: &str,
    submit_at: &str,
) -> SheetRecord {
    SheetRecord {
        email: Some(email.to_string()),
        name: Some(name.to_string()),
        phone_no: Some(phone_no.to_string()),
        course_name: Some(course_name.to_string()),
        page_variant: Some(page_variant.to_string()),
        utm_source: Some(utm.to_string()),
        utm_medium: Some(utm.to_string()),
        utm_campaign: Some(utm.to_string()),
        utm_term: Some(utm.to_string()),
        utm_content: Some(utm.to_string()),
        submit_at: Some(submit_at.to_string()),
    }
}

/// Returns the sheet rows as JSON: the fixtures when unconfigured, otherwise the
/// upstream body exactly as SheetDB sent it.
pub async fn fetch_sheet_data(
    client: &reqwest::Client,
    settings: &cfg::SheetDbSettings,
    query: &SheetQuery,
) -> Result<Value, Error> {
    if !settings.is_configured() {
        tracing::debug!("SheetDB is not configured, serving fixture records");
        return Ok(serde_json::to_value(fixture_records())?);
    }

    let endpoint = settings.endpoint()?;
    let pairs = query.to_pairs();
    tracing::info!(endpoint = %endpoint, params = ?pairs, "Forwarding sheet query to SheetDB");

    let body = client
        .get(endpoint)
        .query(&pairs)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;
    Ok(body)
}
