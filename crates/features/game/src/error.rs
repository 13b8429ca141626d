use std::borrow::Cow;

/// Error types specific to the game feature.
#[pm_derive::pm_error]
pub enum GameError {
    /// The round stopped before its last tick.
    #[error("Round aborted{}: {message}", format_context(.context))]
    Aborted { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Sending a frame to the player failed.
    #[error("Client channel error{}: {message}", format_context(.context))]
    Channel { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The finished round could not be persisted.
    #[error("Score persistence failed{}: {message}", format_context(.context))]
    Store { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal game error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
