use std::borrow::Cow;

/// A specialized [`MeterError`] enum of this crate.
#[pm_derive::pm_error]
pub enum MeterError {
    /// The payload is not the expected JSON document.
    #[error("Malformed meter payload{}: {source}", format_context(.context))]
    Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The power entry exists but is not a number.
    #[error("Invalid power value{}: {message}", format_context(.context))]
    InvalidValue { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal meter error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
