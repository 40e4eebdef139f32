//! PromptBox: store, version, convert and A/B-test LLM prompts.

pub mod abtest;
pub mod api;
pub mod app;
pub mod config;
pub mod convert;
pub mod error;
pub mod template;
pub mod ui;

pub use convert::{convert, convert_named, convert_with, ConvertOptions, TargetFormat};
pub use error::{ApiError, PromptBoxError};
