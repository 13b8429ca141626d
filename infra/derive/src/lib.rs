#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the PowerMatch workspace.
//!
//! * [`macro@main`] boots an `async fn main` on a pre-configured Tokio runtime.
//! * [`macro@pm_error`] turns an enum into a context-carrying error type.
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own
//! macros in doctests; see the consuming crates for compiled usages.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap the PowerMatch Tokio runtime.
///
/// Transforms an `async fn main` into a plain `fn main` that builds a runtime
/// from the chosen `pm_runtime::RuntimeConfig` profile and blocks on the body.
///
/// # Arguments
///
/// * `high_performance` - Server profile (larger stacks, longer keep-alive).
/// * `default` (or no argument) - Worker count auto-detected.
///
/// # Examples
///
/// ```rust,ignore
/// #[pm_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for domain error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and
///   for `Result<T, SourceError>` of every variant that wraps a source.
/// * `From<SourceError>` for variants with a `source` (or `#[source]`/`#[from]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for use in `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. Variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[pm_derive::pm_error]
/// pub enum MeterError {
///     #[error("Payload error{}: {source}", format_context(.context))]
///     Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal meter error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &[u8]) -> Result<serde_json::Value, MeterError> {
///     serde_json::from_slice(raw).context("Decoding meter payload")
/// }
/// ```
#[proc_macro_attribute]
pub fn pm_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
