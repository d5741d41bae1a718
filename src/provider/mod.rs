//! LLM provider abstraction for slimspec.
//!
//! Normalizes a colon-delimited model identifier into a [`ModelSpec`],
//! matches its provider against [`ProviderKind`], and dispatches a single
//! completion round trip to the vendor's HTTP endpoint via [`LlmGateway`].
//! Pipelines depend on the [`Completion`] trait so tests can substitute a
//! mock gateway.

mod client;
mod kind;
mod model;

pub use client::{Completion, LlmGateway, ProviderError};
pub use kind::ProviderKind;
#[allow(unused_imports)]
pub use model::{ModelSpec, ParseModelError};
