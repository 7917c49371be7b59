#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the StudyHub crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! shub-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! The generated code refers to `::thiserror`, so every consumer must depend on it directly.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining domain error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(..)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every source-bearing variant.
/// * **Conversions**: `From<Source>` for variants with a `source` field (or a field marked
///   `#[source]`/`#[from]`), which makes `?` work on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` if an `Internal` variant
///   exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with **named-field** variants.
/// 2. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 3. Variants with a source field must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[shub_derive::shub_error]
/// pub enum CatalogError {
///     #[error("Catalog parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(raw: &str) -> Result<Plans, CatalogError> {
///     serde_json::from_str(raw).context("Reading plan list")
/// }
/// ```
#[proc_macro_attribute]
pub fn shub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
