//! AWS Step Functions implementation of [`WorkflowTrigger`].

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_sfn::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use emblue_core::config::TriggerConfig;

use crate::trigger::{ExecutionInput, TriggerError, TriggerReceipt, WorkflowTrigger};

/// Maximum length Step Functions accepts for an execution name.
const MAX_EXECUTION_NAME_LEN: usize = 80;

/// Provider name reported for the static credentials.
const CREDENTIALS_PROVIDER: &str = "emblue-trigger-config";

/// Starts executions of one state machine.
pub struct StepFunctionsTrigger {
    client: aws_sdk_sfn::Client,
    state_machine_arn: String,
    execution_name: Option<String>,
}

impl StepFunctionsTrigger {
    /// Build a client from the configured region and static credentials.
    pub async fn from_config(config: &TriggerConfig) -> Self {
        let credentials = Credentials::new(
            config.aws.access_key.clone(),
            config.aws.secret_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self::new(
            aws_sdk_sfn::Client::new(&sdk_config),
            config.state_machine_arn.clone(),
            config.execution_name.clone(),
        )
    }

    pub fn new(
        client: aws_sdk_sfn::Client,
        state_machine_arn: String,
        execution_name: Option<String>,
    ) -> Self {
        Self {
            client,
            state_machine_arn,
            execution_name,
        }
    }
}

impl WorkflowTrigger for StepFunctionsTrigger {
    async fn start_execution(&self, input: &ExecutionInput) -> Result<TriggerReceipt, TriggerError> {
        let payload = serde_json::to_string(input)?;

        let mut request = self
            .client
            .start_execution()
            .state_machine_arn(&self.state_machine_arn)
            .input(payload);

        if let Some(prefix) = &self.execution_name {
            request = request.name(execution_name(
                prefix,
                &input.file_date,
                &input.account.hostname,
            ));
        }

        match request.send().await {
            Ok(output) => Ok(TriggerReceipt {
                execution_arn: output.execution_arn().to_string(),
            }),
            Err(SdkError::ServiceError(err)) => {
                let err = err.into_err();
                Err(TriggerError::Rejected {
                    code: err.code().unwrap_or("Unknown").to_string(),
                    message: err.message().unwrap_or_default().to_string(),
                })
            }
            Err(other) => Err(TriggerError::Transport(
                DisplayErrorContext(&other).to_string(),
            )),
        }
    }
}

/// Deterministic execution name for an (account, date) pair.
///
/// Characters outside `[A-Za-z0-9_-]` become `-` and the result is cut to
/// the 80 characters Step Functions allows. Starting the same pair twice
/// then fails with `ExecutionAlreadyExists` instead of running twice.
pub fn execution_name(prefix: &str, file_date: &str, hostname: &str) -> String {
    format!("{prefix}-{file_date}-{hostname}")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .take(MAX_EXECUTION_NAME_LEN)
        .collect()
}
