//! URL info response body

use serde::Serialize;

use crate::domain::ReputationRecord;

/// Reputation of a reconstructed URL, echoing the caller's request id.
/// Keys serialize in declaration order: `RequestId, Url, Risk, Category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UrlInfoResponse {
    pub request_id: String,
    pub url: String,
    pub risk: String,
    pub category: String,
}

impl UrlInfoResponse {
    pub fn new(request_id: impl Into<String>, record: ReputationRecord) -> Self {
        Self {
            request_id: request_id.into(),
            url: record.url,
            risk: record.risk,
            category: record.category,
        }
    }
}
