pub mod build_pipeline;
pub mod commands;
pub mod config;
pub mod generator;
pub mod project;
