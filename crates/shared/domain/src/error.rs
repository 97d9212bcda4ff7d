use std::borrow::Cow;

#[sky_derive::sky_error]
pub enum DomainError {
    /// A persisted or typed-in token does not name any variant.
    #[error("Unknown {kind} token{}: '{message}'", format_context(.context))]
    UnknownToken {
        kind: &'static str,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}
