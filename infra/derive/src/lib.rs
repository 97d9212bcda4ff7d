#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros for the sky infrastructure crates.
//!
//! Only one macro lives here for now: [`macro@sky_error`], which turns a plain enum into
//! the workspace's error shape (thiserror-backed, with optional context and a
//! companion `...Ext` trait).

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(...)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Standard Conversions**: Implements `From<Source>` for variants holding a `source`
///   field (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
/// * **`format_context`**: A private helper for `#[error(...)]` strings that renders
///   `" (context)"` or nothing.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. A variant wrapping a source error must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use sky_derive::sky_error;
/// use std::borrow::Cow;
///
/// #[sky_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("Reading preferences")
/// }
/// ```
#[proc_macro_attribute]
pub fn sky_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
