pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod persistence;
pub mod render;
