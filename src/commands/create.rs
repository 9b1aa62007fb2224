use crate::OutputFormat;
use crate::aws::client::{self, CredentialSource};
use crate::aws::stacks::{self, StackOutcome, StackParameter, StackRequest};
use crate::display::{format_json_output, print_error, print_info, print_success};
use crate::error::StackitError;
use std::path::PathBuf;

/// Arguments for the create command
#[derive(Debug)]
pub struct CreateArgs {
    pub name: String,
    pub template_file: PathBuf,
    pub config: Option<PathBuf>,
    pub parameters: Vec<StackParameter>,
    pub disable_rollback: bool,
    pub timeout_in_minutes: i32,
}

/// Template parameters used when no --param is given.
pub fn default_parameters() -> Vec<StackParameter> {
    vec![
        StackParameter::new("KeyName", "AxiadKey"),
        StackParameter::new("VpcCidr", "10.1.0.0/16"),
        StackParameter::new("InstanceType", "t2.micro"),
    ]
}

/// Create a CloudFormation stack from a local template.
///
/// Construction failures (unreadable or incomplete configuration) are
/// fatal and propagate to the caller. Remote-call failures are logged
/// and swallowed: a failed provisioning attempt never crashes the run.
pub async fn create(args: CreateArgs, format: &OutputFormat) -> Result<(), StackitError> {
    print_info(&format!("Creating CloudFormation stack '{}'...", args.name));

    let source = CredentialSource::resolve(args.config.as_deref())?;
    let cf_client = client::create_cloudformation_client(source).await?;

    let parameters = if args.parameters.is_empty() {
        default_parameters()
    } else {
        args.parameters
    };

    let request = StackRequest {
        name: args.name,
        template_path: args.template_file,
        parameters,
        disable_rollback: args.disable_rollback,
        timeout_in_minutes: args.timeout_in_minutes,
    };

    let outcome = stacks::create_stack(&cf_client, &request).await;
    report_outcome(&outcome, format)
}

fn report_outcome(outcome: &StackOutcome, format: &OutputFormat) -> Result<(), StackitError> {
    match outcome {
        StackOutcome::Created {
            stack_name,
            stack_id,
        } => match stack_id {
            Some(id) => print_success(&format!(
                "stack '{}' creation started: {}",
                stack_name, id
            )),
            None => print_success(&format!("stack '{}' creation started", stack_name)),
        },
        StackOutcome::Failed { kind, message } => {
            print_error(&format!("{} during stack creation: {}", kind, message));
        }
    }

    if let OutputFormat::Json = format {
        println!("{}", format_json_output(outcome)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::stacks::FailureKind;

    #[test]
    fn test_default_parameters_match_fixed_provisioning_set() {
        let params = default_parameters();
        assert_eq!(
            params,
            vec![
                StackParameter::new("KeyName", "AxiadKey"),
                StackParameter::new("VpcCidr", "10.1.0.0/16"),
                StackParameter::new("InstanceType", "t2.micro"),
            ]
        );
    }

    #[test]
    fn test_remote_failure_is_swallowed() {
        let outcome = StackOutcome::Failed {
            kind: FailureKind::Service,
            message: "AlreadyExistsException: stack exists".to_string(),
        };
        assert!(report_outcome(&outcome, &OutputFormat::Text).is_ok());
    }

    #[test]
    fn test_success_outcome_reports_ok() {
        let outcome = StackOutcome::Created {
            stack_name: "test".to_string(),
            stack_id: Some("arn:aws:cloudformation:us-east-1:123:stack/test/abc".to_string()),
        };
        assert!(outcome.is_created());
        assert!(report_outcome(&outcome, &OutputFormat::Json).is_ok());
    }
}
