//! DTOs for the bulk check endpoint.

use crate::api::dto::check::DomainCheckResponse;
use crate::application::services::BulkItem;
use serde::{Deserialize, Serialize};

/// Body of `POST /bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkCheckRequest {
    pub domains: Vec<String>,
    pub tld: Option<String>,
}

/// One slot of the bulk response.
///
/// Uses untagged enum so checked items look exactly like a single check.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BulkResultItem {
    Checked(DomainCheckResponse),
    Rejected {
        domain: String,
        status: &'static str,
        error: String,
    },
}

impl From<&BulkItem> for BulkResultItem {
    fn from(item: &BulkItem) -> Self {
        match item {
            BulkItem::Checked(result) => Self::Checked(result.into()),
            BulkItem::Rejected { input, tld, reason } => Self::Rejected {
                domain: format!("{input}.{tld}"),
                status: "error",
                error: reason.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BulkCheckResponse {
    pub results: Vec<BulkResultItem>,
}

impl From<&[BulkItem]> for BulkCheckResponse {
    fn from(items: &[BulkItem]) -> Self {
        Self {
            results: items.iter().map(BulkResultItem::from).collect(),
        }
    }
}
