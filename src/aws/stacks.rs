use crate::error::StackitError;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::error::{DisplayErrorContext, SdkError};
use aws_sdk_cloudformation::types::Parameter;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

/// Response statuses below this ceiling count as success. The ceiling is
/// a parameter of the classification, see `create_stack_with_ceiling`.
pub const DEFAULT_SUCCESS_STATUS_CEILING: u16 = 300;

/// A single template parameter key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackParameter {
    pub key: String,
    pub value: String,
}

impl StackParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl FromStr for StackParameter {
    type Err = StackitError;

    /// Parse `KEY=VALUE` text. The split is at the first `=`, so the
    /// value may itself contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((key, value)) = s.split_once('=') else {
            return Err(StackitError::Parse(format!(
                "invalid parameter '{}': expected KEY=VALUE",
                s
            )));
        };
        if key.is_empty() {
            return Err(StackitError::Parse(format!(
                "invalid parameter '{}': empty key",
                s
            )));
        }
        Ok(StackParameter::new(key, value))
    }
}

/// One CreateStack attempt. Constructed once per run and not mutated;
/// the template body is read from `template_path` when the call is made.
#[derive(Debug, Clone)]
pub struct StackRequest {
    pub name: String,
    pub template_path: PathBuf,
    pub parameters: Vec<StackParameter>,
    pub disable_rollback: bool,
    pub timeout_in_minutes: i32,
}

/// How a stack creation attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request was rejected before it was dispatched.
    Value,
    /// CloudFormation returned a modeled service error.
    Service,
    /// A response came back that does not look like success.
    UnexpectedStatus,
    /// Template read failures, connectivity, timeouts, anything else.
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FailureKind::Value => write!(f, "value error"),
            FailureKind::Service => write!(f, "client error"),
            FailureKind::UnexpectedStatus => write!(f, "unexpected status"),
            FailureKind::Other => write!(f, "unexpected error"),
        }
    }
}

/// Outcome of a stack creation attempt. Failures are values, not
/// propagated errors: the caller logs them and the process carries on.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StackOutcome {
    Created {
        stack_name: String,
        stack_id: Option<String>,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

impl StackOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, StackOutcome::Created { .. })
    }
}

/// Read the template body verbatim from disk. No substitution happens
/// locally; interpreting the body is the service's concern.
pub fn read_template(path: &Path) -> Result<String, StackitError> {
    Ok(fs::read_to_string(path)?)
}

fn is_success_status(status: u16, ceiling: u16) -> bool {
    status < ceiling
}

/// Issue a single CreateStack call with the default success ceiling.
pub async fn create_stack(client: &Client, request: &StackRequest) -> StackOutcome {
    create_stack_with_ceiling(client, request, DEFAULT_SUCCESS_STATUS_CEILING).await
}

/// Issue a single CreateStack call. Best effort: every failure is folded
/// into the returned outcome and nothing propagates. No retries.
pub async fn create_stack_with_ceiling(
    client: &Client,
    request: &StackRequest,
    success_status_ceiling: u16,
) -> StackOutcome {
    let template_body = match read_template(&request.template_path) {
        Ok(body) => body,
        Err(e) => {
            return StackOutcome::Failed {
                kind: FailureKind::Other,
                message: format!(
                    "failed to read template {}: {}",
                    request.template_path.display(),
                    e
                ),
            };
        }
    };

    let result = client
        .create_stack()
        .stack_name(&request.name)
        .template_body(template_body)
        .set_parameters(Some(to_sdk_parameters(&request.parameters)))
        .disable_rollback(request.disable_rollback)
        .timeout_in_minutes(request.timeout_in_minutes)
        .client_request_token(Uuid::new_v4().to_string())
        .send()
        .await;

    match result {
        Ok(output) => StackOutcome::Created {
            stack_name: request.name.clone(),
            stack_id: output.stack_id().map(str::to_string),
        },
        Err(SdkError::ServiceError(ctx)) => {
            let status = ctx.raw().status().as_u16();
            StackOutcome::Failed {
                kind: FailureKind::Service,
                message: format!("create stack failed with status {}: {}", status, ctx.err()),
            }
        }
        Err(SdkError::ResponseError(ctx)) => {
            let status = ctx.raw().status().as_u16();
            let kind = if is_success_status(status, success_status_ceiling) {
                FailureKind::Other
            } else {
                FailureKind::UnexpectedStatus
            };
            StackOutcome::Failed {
                kind,
                message: format!("unhandled response with status {}", status),
            }
        }
        Err(SdkError::ConstructionFailure(_)) => StackOutcome::Failed {
            kind: FailureKind::Value,
            message: "create stack request could not be constructed".to_string(),
        },
        Err(err) => StackOutcome::Failed {
            kind: FailureKind::Other,
            message: format!("{}", DisplayErrorContext(&err)),
        },
    }
}

fn to_sdk_parameters(parameters: &[StackParameter]) -> Vec<Parameter> {
    parameters
        .iter()
        .map(|p| {
            Parameter::builder()
                .parameter_key(p.key.as_str())
                .parameter_value(p.value.as_str())
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_parameter() {
        let param: StackParameter = "KeyName=AxiadKey".parse().unwrap();
        assert_eq!(param, StackParameter::new("KeyName", "AxiadKey"));
    }

    #[test]
    fn test_parse_parameter_value_keeps_embedded_equals() {
        let param: StackParameter = "VpcCidr=10.1.0.0/16=extra".parse().unwrap();
        assert_eq!(param.key, "VpcCidr");
        assert_eq!(param.value, "10.1.0.0/16=extra");
    }

    #[test]
    fn test_parse_parameter_without_equals_fails() {
        let result: Result<StackParameter, _> = "NoEquals".parse();
        assert!(matches!(result, Err(StackitError::Parse(_))));
    }

    #[test]
    fn test_parse_parameter_with_empty_key_fails() {
        let result: Result<StackParameter, _> = "=value".parse();
        assert!(matches!(result, Err(StackitError::Parse(_))));
    }

    #[test]
    fn test_success_status_ceiling_boundary() {
        assert!(is_success_status(200, DEFAULT_SUCCESS_STATUS_CEILING));
        assert!(is_success_status(299, DEFAULT_SUCCESS_STATUS_CEILING));
        assert!(!is_success_status(300, DEFAULT_SUCCESS_STATUS_CEILING));
        assert!(!is_success_status(500, DEFAULT_SUCCESS_STATUS_CEILING));
    }

    #[test]
    fn test_success_status_ceiling_is_overridable() {
        assert!(is_success_status(199, 200));
        assert!(!is_success_status(200, 200));
    }

    #[test]
    fn test_read_template_returns_contents_verbatim() {
        let body = "Resources:\n  Vpc:\n    Type: AWS::EC2::VPC\n";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();

        assert_eq!(read_template(file.path()).unwrap(), body);
    }

    #[test]
    fn test_read_template_missing_file_is_io_error() {
        let result = read_template(Path::new("/nonexistent/template.yaml"));
        assert!(matches!(result, Err(StackitError::Io(_))));
    }

    #[test]
    fn test_sdk_parameters_preserve_order_and_pairs() {
        let params = vec![
            StackParameter::new("KeyName", "AxiadKey"),
            StackParameter::new("VpcCidr", "10.1.0.0/16"),
        ];
        let sdk_params = to_sdk_parameters(&params);

        assert_eq!(sdk_params.len(), 2);
        assert_eq!(sdk_params[0].parameter_key(), Some("KeyName"));
        assert_eq!(sdk_params[0].parameter_value(), Some("AxiadKey"));
        assert_eq!(sdk_params[1].parameter_key(), Some("VpcCidr"));
        assert_eq!(sdk_params[1].parameter_value(), Some("10.1.0.0/16"));
    }

    #[test]
    fn test_failure_kind_tags() {
        assert_eq!(FailureKind::Value.to_string(), "value error");
        assert_eq!(FailureKind::Service.to_string(), "client error");
        assert_eq!(FailureKind::UnexpectedStatus.to_string(), "unexpected status");
        assert_eq!(FailureKind::Other.to_string(), "unexpected error");
    }
}
