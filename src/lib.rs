//! mdpolish library: provider presets, completion client, Markdown export.

pub mod api;
pub mod config;
pub mod export;

#[cfg(test)]
pub mod test_support;
