/// Calendar dates handled by the trigger carry no timezone; "today" is
/// always taken in UTC.
pub type Date = chrono::NaiveDate;

/// Status written to `em_blue_migration_log` when a workflow execution was
/// rejected and the (account, date) pair still needs processing.
pub const PENDING_TO_PROCESS: &str = "PENDING_TO_PROCESS";
