use std::borrow::Cow;

#[sky_derive::sky_error]
pub enum RegistryError {
    #[error("Sky storage error{}: {source}", format_context(.context))]
    Storage { source: sky_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Sky encoding error{}: {source}", format_context(.context))]
    Encode { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
