//! Sequential (date x account) dispatch loop.
//!
//! Every pair is triggered independently: a rejection is logged to the
//! registry and the loop moves on, while any other failure aborts the run.
//! Nothing is retried and nothing runs concurrently.

use emblue_core::dates::DateRange;
use emblue_core::types::Date;
use emblue_db::models::migration_log::CreateMigrationLog;
use emblue_db::DbError;
use serde::Serialize;

use crate::store::{AccountSource, PendingLog};
use crate::trigger::{ExecutionInput, TriggerError, WorkflowTrigger};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A pair whose workflow execution was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggeredExecution {
    pub date: Date,
    /// Account hostname.
    pub account: String,
    pub execution_arn: String,
}

/// Outcome of one dispatcher run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchReport {
    /// Accepted executions in dispatch order.
    pub triggered: Vec<TriggeredExecution>,
    /// Number of date buckets walked.
    pub dates: usize,
    /// Number of pairs logged as pending.
    pub rejected: usize,
}

/// Failures that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Trigger(#[from] TriggerError),
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct Dispatcher<'a, S, T> {
    store: &'a S,
    trigger: &'a T,
}

impl<'a, S, T> Dispatcher<'a, S, T>
where
    S: AccountSource + PendingLog,
    T: WorkflowTrigger,
{
    pub fn new(store: &'a S, trigger: &'a T) -> Self {
        Self { store, trigger }
    }

    /// Start one execution per (account, date) pair in `range`.
    ///
    /// Accounts are fetched once per run. Dates are walked in ascending
    /// order, accounts in the order the store returns them.
    pub async fn run(&self, range: DateRange) -> Result<DispatchReport, DispatchError> {
        let mut report = DispatchReport::default();
        if range.is_empty() {
            tracing::info!(
                start = %range.start,
                end = %range.end,
                "Empty date range, nothing to dispatch"
            );
            return Ok(report);
        }

        let accounts = self.store.accounts().await?;
        tracing::info!(
            accounts = accounts.len(),
            start = %range.start,
            end = %range.end,
            "Dispatching workflow executions"
        );

        for date in range.days() {
            report.dates += 1;

            for account in &accounts {
                let input = ExecutionInput::new(account.clone(), date);

                match self.trigger.start_execution(&input).await {
                    Ok(receipt) => {
                        tracing::info!(
                            account = %account.hostname,
                            file_date = %input.file_date,
                            execution_arn = %receipt.execution_arn,
                            "Workflow execution started"
                        );
                        report.triggered.push(TriggeredExecution {
                            date,
                            account: account.hostname.clone(),
                            execution_arn: receipt.execution_arn,
                        });
                    }
                    Err(TriggerError::Rejected { code, message }) => {
                        tracing::error!(
                            account = %account.hostname,
                            file_date = %input.file_date,
                            code = %code,
                            error = %message,
                            "Workflow execution rejected, logging as pending"
                        );
                        let log = CreateMigrationLog::pending(
                            date,
                            &account.hostname,
                            format!("{code}: {message}"),
                        );
                        self.store.record_pending(&log).await?;
                        report.rejected += 1;
                    }
                    Err(e) => {
                        tracing::error!(
                            account = %account.hostname,
                            file_date = %input.file_date,
                            error = %e,
                            "Workflow trigger failed, aborting run"
                        );
                        return Err(e.into());
                    }
                }
            }
        }

        tracing::info!(
            triggered = report.triggered.len(),
            rejected = report.rejected,
            dates = report.dates,
            "Dispatch finished"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
