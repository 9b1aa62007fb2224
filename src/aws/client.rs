use crate::config;
use crate::error::StackitError;
use aws_credential_types::Credentials;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::config::Region;
use std::path::Path;

pub const REGION_KEY: &str = "AWS_REGION_NAME";
pub const ACCESS_KEY_ID_KEY: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Where the CloudFormation client gets its region and credentials from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Region and key pair read from a stackit configuration file.
    Explicit {
        region: String,
        access_key_id: String,
        secret_access_key: String,
    },
    /// The SDK's default provider chain: environment variables,
    /// ~/.aws/credentials, IAM role (EC2, ECS, Lambda, ...).
    Ambient,
}

impl CredentialSource {
    /// Decide between explicit and ambient configuration. A config file
    /// path means explicit credentials; no path means the default chain.
    pub fn resolve(config_file: Option<&Path>) -> Result<Self, StackitError> {
        match config_file {
            Some(path) => {
                tracing::info!("using custom configuration from {}", path.display());
                Self::from_config_file(path)
            }
            None => {
                tracing::info!("using default configuration");
                Ok(CredentialSource::Ambient)
            }
        }
    }

    /// Load explicit credentials from a KEY=VALUE configuration file.
    /// All three keys must be present.
    pub fn from_config_file(path: &Path) -> Result<Self, StackitError> {
        let config = config::load_config(path)?;
        Ok(CredentialSource::Explicit {
            region: require_key(&config, REGION_KEY, path)?,
            access_key_id: require_key(&config, ACCESS_KEY_ID_KEY, path)?,
            secret_access_key: require_key(&config, SECRET_ACCESS_KEY_KEY, path)?,
        })
    }
}

fn require_key(
    config: &config::ConfigMap,
    key: &'static str,
    path: &Path,
) -> Result<String, StackitError> {
    config
        .get(key)
        .cloned()
        .ok_or_else(|| StackitError::MissingKey {
            key,
            path: path.display().to_string(),
        })
}

/// Build a CloudFormation client for the given credential source.
///
/// Fails with a configuration error when the resolved SDK configuration
/// carries no region; such a client cannot sign requests.
pub async fn create_cloudformation_client(
    source: CredentialSource,
) -> Result<Client, StackitError> {
    let sdk_config = match source {
        CredentialSource::Explicit {
            region,
            access_key_id,
            secret_access_key,
        } => {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "stackit-config-file",
            );
            aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(Region::new(region))
                .credentials_provider(credentials)
                .load()
                .await
        }
        CredentialSource::Ambient => {
            aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await
        }
    };

    if sdk_config.region().is_none() {
        return Err(StackitError::Config(
            "not able to initialize client with configuration".to_string(),
        ));
    }

    Ok(Client::new(&sdk_config))
}
