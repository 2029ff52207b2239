pub mod archive;
pub mod assets;
pub mod config;
pub mod converter;
pub mod placeholders;
pub mod templates;
