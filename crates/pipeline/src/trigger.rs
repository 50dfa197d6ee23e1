//! The workflow service seam.

use std::future::Future;

use emblue_core::dates::file_date;
use emblue_core::types::Date;
use emblue_db::models::account::EmblueAccount;
use serde::Serialize;

/// Input document of one workflow execution.
///
/// Serializes to `{"account": [hostname, user, password], "file_date": "YYYYMMDD"}`.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionInput {
    pub account: EmblueAccount,
    pub file_date: String,
    #[serde(skip)]
    pub date: Date,
}

impl ExecutionInput {
    pub fn new(account: EmblueAccount, date: Date) -> Self {
        Self {
            account,
            file_date: file_date(date),
            date,
        }
    }
}

/// Acknowledgement that the workflow service accepted an execution.
#[derive(Debug, Clone)]
pub struct TriggerReceipt {
    pub execution_arn: String,
}

/// Errors from starting a workflow execution.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// The service answered with an error response (throttling, limits,
    /// duplicate execution name, invalid input, ...). The pair is logged
    /// as pending and the run continues.
    #[error("Workflow service rejected the execution ({code}): {message}")]
    Rejected { code: String, message: String },

    /// The request never produced a service response (network, timeout,
    /// credentials, request construction).
    #[error("Workflow service call failed: {0}")]
    Transport(String),

    #[error("Execution input could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Starts workflow executions.
pub trait WorkflowTrigger: Send + Sync {
    /// Submit `input` and wait only for the service to accept or reject it.
    fn start_execution(
        &self,
        input: &ExecutionInput,
    ) -> impl Future<Output = Result<TriggerReceipt, TriggerError>> + Send;
}
