use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocalChatError {
    #[error("empty input: nothing to send")]
    EmptyInput,

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LocalChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_error() {
        let err = LocalChatError::EmptyInput;
        assert_eq!(err.to_string(), "empty input: nothing to send");
    }

    #[test]
    fn test_config_error() {
        let err = LocalChatError::Config("timeout must be positive".to_string());
        assert_eq!(err.to_string(), "config error: timeout must be positive");
    }
}
