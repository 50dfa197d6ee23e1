//! API Gateway style response envelope returned by every invocation.

use emblue_pipeline::{DispatchError, DispatchReport, TriggeredExecution};
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "emBlue download executions dispatched";
pub const FAILURE_MESSAGE: &str = "emBlue download dispatch failed";

/// `{statusCode, body}` where `body` is a JSON document encoded as a string.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    message: &'static str,
    input: &'a serde_json::Value,
    download_files: &'a [TriggeredExecution],
    rejected: usize,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    message: &'static str,
    input: &'a serde_json::Value,
    error: String,
}

impl TriggerResponse {
    pub fn ok(input: &serde_json::Value, report: &DispatchReport) -> Self {
        let body = SuccessBody {
            message: SUCCESS_MESSAGE,
            input,
            download_files: &report.triggered,
            rejected: report.rejected,
        };
        Self::with_body(200, &body)
    }

    pub fn failed(input: &serde_json::Value, error: &DispatchError) -> Self {
        let body = FailureBody {
            message: FAILURE_MESSAGE,
            input,
            error: error.to_string(),
        };
        Self::with_body(500, &body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    fn with_body<B: Serialize>(status_code: u16, body: &B) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to encode response body");
            String::from("{}")
        });
        Self { status_code, body }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use emblue_db::DbError;
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn success_lists_triggered_pairs() {
        let report = DispatchReport {
            triggered: vec![TriggeredExecution {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                account: "acme.emblue.com".to_string(),
                execution_arn: "arn:exec:1".to_string(),
            }],
            dates: 1,
            rejected: 2,
        };

        let response = TriggerResponse::ok(&json!({"source": "aws.events"}), &report);
        assert_eq!(response.status_code, 200);
        assert!(response.is_success());

        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["message"], SUCCESS_MESSAGE);
        assert_eq!(body["input"]["source"], "aws.events");
        assert_eq!(body["rejected"], 2);
        assert_eq!(
            body["download_files"],
            json!([{
                "date": "2024-03-01",
                "account": "acme.emblue.com",
                "execution_arn": "arn:exec:1",
            }])
        );
    }

    #[test]
    fn failure_is_not_reported_as_success() {
        let response = TriggerResponse::failed(
            &Value::Null,
            &DispatchError::Database(DbError::TenantNotFound),
        );
        assert_eq!(response.status_code, 500);
        assert!(!response.is_success());

        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["message"], FAILURE_MESSAGE);
        assert_eq!(body["error"], "No tenant matches the configured client key");
        assert!(body.get("download_files").is_none());
    }

    #[test]
    fn envelope_uses_status_code_casing() {
        let response = TriggerResponse::ok(&Value::Null, &DispatchReport::default());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert!(json["body"].is_string());
    }
}
