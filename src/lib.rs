pub mod analyzers;
pub mod config;
pub mod loader;
pub mod normalizer;
pub mod output;
pub mod render;
pub mod report;
