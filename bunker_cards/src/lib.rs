#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Character-card generation with repetition tracking.

mod error;
pub mod extract;
pub mod generator;
pub mod store;

pub use error::{GenerateError, Result};
pub use extract::{ExtractedCard, FIELD_PATTERNS, Field, FieldExtractor};
pub use generator::{
    AgeConfig, CardGenerator, ExhaustionPolicy, FERTILITY, GENDERS, GenerationRequest,
    GeneratorConfig,
};
pub use store::{Category, ValueStore};
