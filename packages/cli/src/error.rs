use sqlmask_rs_sdk::AnonymizeError;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CliError {
    Message(String),
    Io {
        context: &'static str,
        source: std::io::Error,
    },
    Anonymize(AnonymizeError),
}

impl CliError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// 2 when the caller's input was at fault, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Anonymize(err) if err.is_client_error() => 2,
            _ => 1,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{message}"),
            Self::Io { context, source } => write!(f, "{context}: {source}"),
            Self::Anonymize(err) => write!(f, "{}: {err}", err.code().as_str()),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Anonymize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AnonymizeError> for CliError {
    fn from(err: AnonymizeError) -> Self {
        Self::Anonymize(err)
    }
}
