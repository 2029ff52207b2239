//! Flattens report-template export archives into self-contained JSON.
//!
//! Every asset reference inside a template's `content` is replaced with the
//! asset itself: stylesheets and scripts inline as text, fonts and images as
//! `data:` URIs.

pub mod services;
pub mod types;

pub use services::config::ConverterConfig;
pub use services::converter::{Conversion, ConversionSummary, Converter};
pub use types::{ConvertError, ConvertResult};
