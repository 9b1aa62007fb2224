use crate::error::StackitError;

pub fn print_success(message: &str) {
    tracing::info!("✓ {}", message);
}

pub fn print_info(message: &str) {
    tracing::info!("{}", message);
}

pub fn print_error(message: &str) {
    tracing::error!("{}", message);
}

pub fn format_json_output<T: serde::Serialize>(data: &T) -> Result<String, StackitError> {
    serde_json::to_string_pretty(data)
        .map_err(|e| StackitError::Parse(format!("JSON serialization error: {}", e)))
}
