use pm_derive::pm_error;

#[pm_error]
pub enum ReadingError {
    #[error("Decode error: {source}")]
    Decode {
        #[source]
        source: std::num::ParseFloatError,
    },
}

fn main() {}
