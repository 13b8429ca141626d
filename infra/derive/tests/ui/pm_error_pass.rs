use pm_derive::pm_error;
use std::borrow::Cow;

#[pm_error]
pub enum ReadingError {
    #[error("Decode error{}: {source}", format_context(.context))]
    Decode {
        #[source]
        source: std::num::ParseFloatError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<f64, ReadingError> {
    raw.parse::<f64>().context("Parsing wattage")
}

fn main() {
    let err = parse("not-a-number").unwrap_err();
    assert!(err.to_string().contains("(Parsing wattage)"));

    let internal: ReadingError = "boom".into();
    assert!(matches!(internal, ReadingError::Internal { .. }));
}
