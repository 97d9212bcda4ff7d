use sky_derive::sky_error;
use std::borrow::Cow;

#[sky_error]
pub enum PrefsError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Malformed entry{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_prefs() -> Result<Vec<u8>, PrefsError> {
    std::fs::read("/definitely/not/here.prefs").context("Reading preferences")
}

fn main() {
    let err = read_prefs().expect_err("missing file");
    assert!(err.to_string().contains("(Reading preferences)"));

    let internal: PrefsError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");

    let tagged: Result<(), PrefsError> =
        Err(PrefsError::Malformed { message: "SAVED_STARS".into(), context: None });
    let tagged = tagged.context("decoding").expect_err("still an error");
    assert_eq!(tagged.to_string(), "Malformed entry (decoding): SAVED_STARS");
}
