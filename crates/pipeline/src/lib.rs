//! Date-range dispatch of emBlue download workflows.
//!
//! - [`Dispatcher`] walks a [`DateRange`](emblue_core::dates::DateRange)
//!   and starts one workflow execution per (account, date) pair.
//! - [`WorkflowTrigger`] is the seam to the workflow service;
//!   [`StepFunctionsTrigger`] implements it with AWS Step Functions.
//! - [`RegistryStore`] reads accounts from the client database and writes
//!   pending rows to the registry migration log.

pub mod dispatcher;
pub mod step_functions;
pub mod store;
pub mod trigger;

pub use dispatcher::{DispatchError, DispatchReport, Dispatcher, TriggeredExecution};
pub use step_functions::StepFunctionsTrigger;
pub use store::{AccountSource, PendingLog, RegistryStore};
pub use trigger::{ExecutionInput, TriggerError, TriggerReceipt, WorkflowTrigger};
