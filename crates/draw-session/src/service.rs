//! Transport-agnostic service facade
//!
//! Exposes the payload contracts a transport layer mounts: a state snapshot,
//! two-state status envelopes for mutations, and the export response. Error
//! details ride along in the envelope; the `status` field keeps its two values.

use crate::store::{MutationReceipt, SessionStore};
use draw_core::{
    DrawConfig, DrawError, DuplicateFlag, ErrorKind, Participant, PrizeTier, PrizeType, Result,
    WinnerLedger,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Either one item or a list of items, as sent by display clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A bare item
    One(T),
    /// A list of items
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Normalize into a list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

/// Payload of a winner-recording request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWinnersRequest {
    /// Prize tier being drawn
    #[serde(rename = "type")]
    pub prize_type: PrizeType,
    /// Winners of this round
    pub data: OneOrMany<Participant>,
}

/// Payload of an absentee-recording request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAbsentRequest {
    /// Participants not present
    pub data: OneOrMany<Participant>,
}

/// Two-state outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The operation completed and was persisted
    Success,
    /// The operation had no effect
    Failed,
}

/// Status envelope returned by mutating operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Success or failure
    pub status: Status,
    /// Failure classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Data-quality flags raised by a successful mutation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<DuplicateFlag>,
}

impl StatusResponse {
    fn from_result(result: Result<MutationReceipt>) -> Self {
        match result {
            Ok(receipt) => Self {
                status: Status::Success,
                error_kind: None,
                detail: None,
                flags: receipt.flags,
            },
            Err(err) => Self::failed(&err),
        }
    }

    fn failed(err: &DrawError) -> Self {
        Self {
            status: Status::Failed,
            error_kind: Some(err.kind()),
            detail: Some(err.message().to_string()),
            flags: Vec::new(),
        }
    }

    /// Whether the operation succeeded
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Everything a display client needs to render the draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    /// Prize catalog in display order
    pub prize_catalog: Vec<PrizeTier>,
    /// Winners drawn per round, per tier position
    pub each_count: Vec<u32>,
    /// Event label
    pub company: String,
    /// Participants still eligible
    pub eligible_pool: Vec<Participant>,
    /// Winners per tier
    pub winner_ledger: WinnerLedger,
}

/// Outcome of an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExportResponse {
    /// The matrix was written
    Success {
        /// Where the artifact was written
        #[serde(rename = "fileReference")]
        file_reference: String,
    },
    /// Nothing was written
    Error {
        /// Failure message
        detail: String,
    },
}

/// Service facade over a [`SessionStore`]
#[derive(Debug, Clone)]
pub struct DrawService {
    store: Arc<SessionStore>,
    each_count: Vec<u32>,
    company: String,
}

impl DrawService {
    /// Wrap `store`, taking display settings from `config`
    pub fn new(store: Arc<SessionStore>, config: &DrawConfig) -> Self {
        Self {
            store,
            each_count: config.each_count.clone(),
            company: config.company.clone(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Catalog, pool and ledger from one consistent snapshot
    pub fn get_state(&self) -> Result<StateResponse> {
        let snapshot = self.store.snapshot()?;
        Ok(StateResponse {
            prize_catalog: self.store.catalog().to_vec(),
            each_count: self.each_count.clone(),
            company: self.company.clone(),
            eligible_pool: snapshot.eligible_pool().to_vec(),
            winner_ledger: snapshot.ledger().clone(),
        })
    }

    /// The shuffled roster
    pub fn get_roster(&self) -> Result<Vec<Participant>> {
        self.store.roster()
    }

    /// Clear the session
    pub async fn reset_session(&self) -> StatusResponse {
        StatusResponse::from_result(self.store.reset().await)
    }

    /// Record the winners of one round
    pub async fn record_winners(&self, request: RecordWinnersRequest) -> StatusResponse {
        let winners = request.data.into_vec();
        StatusResponse::from_result(self.store.record_winners(request.prize_type, winners).await)
    }

    /// Mark participants absent
    pub async fn record_absent(&self, request: RecordAbsentRequest) -> StatusResponse {
        let participants = request.data.into_vec();
        StatusResponse::from_result(self.store.record_absent(participants).await)
    }

    /// Build the export matrix and write it to the results record
    pub async fn export_results(&self) -> ExportResponse {
        match self.write_export().await {
            Ok(file_reference) => {
                tracing::info!(file = %file_reference, "results exported");
                ExportResponse::Success { file_reference }
            }
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                ExportResponse::Error {
                    detail: err.to_string(),
                }
            }
        }
    }

    async fn write_export(&self) -> Result<String> {
        let matrix = self.store.export_matrix()?;
        let name = &self.store.records().results;
        self.store.gateway().save(name, &matrix).await?;
        Ok(self.store.gateway().locate(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn one_or_many_accepts_both_shapes() {
        let one: OneOrMany<Participant> =
            serde_json::from_value(json!({"id": "1", "name": "Ann"})).unwrap();
        assert_eq!(one.into_vec(), vec![Participant::new("1", "Ann")]);

        let many: OneOrMany<Participant> = serde_json::from_value(json!([
            {"id": "1", "name": "Ann"},
            {"id": "2", "name": "Bo"}
        ]))
        .unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn winners_request_uses_type_field() {
        let request: RecordWinnersRequest = serde_json::from_value(json!({
            "type": 2,
            "data": {"id": "5", "name": "Eve"}
        }))
        .unwrap();
        assert_eq!(request.prize_type, PrizeType::new(2));
        assert_eq!(request.data.into_vec(), vec![Participant::new("5", "Eve")]);
    }

    #[test]
    fn failed_status_carries_kind() {
        let response = StatusResponse::failed(&DrawError::validation("bad prize"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"status": "failed", "errorKind": "validation", "detail": "bad prize"})
        );
    }

    #[test]
    fn success_status_is_bare() {
        let response = StatusResponse::from_result(Ok(MutationReceipt {
            recorded: 1,
            eligible: 3,
            flags: Vec::new(),
        }));
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"status": "success"}));
    }

    #[test]
    fn export_response_shapes() {
        let ok = ExportResponse::Success {
            file_reference: "data/results.json".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "success", "fileReference": "data/results.json"})
        );
        let err = ExportResponse::Error {
            detail: "disk full".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"status": "error", "detail": "disk full"})
        );
    }
}
