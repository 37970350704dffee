#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the chanlog crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! chanlog-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to results of every wrapped upstream error.
/// * **Standard Conversions**: Implements `From<Source>` for variants whose only fields are
///   `source` and `context`, so `?` works on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Formatting Helper**: Emits a module-local `format_context` function for use in
///   `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. The item must be an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. A variant wrapping an upstream error (field named `source`, or marked
///    `#[source]`/`#[from]`) must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use chanlog_derive::chanlog_error;
/// use std::borrow::Cow;
///
/// #[chanlog_error]
/// pub enum LoaderError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, LoaderError> {
///     std::fs::read_to_string(path).context(format!("reading {path}"))
/// }
/// ```
#[proc_macro_attribute]
pub fn chanlog_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(&input).unwrap_or_else(syn::Error::into_compile_error).into()
}
