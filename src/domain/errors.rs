use derive_more::Display;

/// One error type for the whole crate. The presentation gate collapses every
/// variant into the same user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ChartError {
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Decode Error: {}", _0)]
    Decode(String),
    #[display(fmt = "No Data: {}", _0)]
    NoData(String),
    #[display(fmt = "Configuration Error: {}", _0)]
    Config(String),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
    #[display(fmt = "Lifecycle Error: {}", _0)]
    Lifecycle(String),
}

impl std::error::Error for ChartError {}

impl ChartError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn rendering(msg: impl Into<String>) -> Self {
        Self::Rendering(msg.into())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
