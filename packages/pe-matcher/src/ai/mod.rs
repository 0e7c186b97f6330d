//! Language model backends.
//!
//! Reference implementations of [`LanguageModel`](crate::LanguageModel).
//! Applications can use these directly or implement their own.

#[cfg(feature = "anthropic")]
mod anthropic;
