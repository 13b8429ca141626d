use std::borrow::Cow;

/// Error types of the browser client.
#[pm_derive::pm_error]
pub enum WebError {
    /// A browser API call failed or is unavailable.
    #[error("Browser error{}: {message}", format_context(.context))]
    Browser { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Decode error{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The current target has no browser to talk to.
    #[error("Unsupported{}: {message}", format_context(.context))]
    Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
