pub mod catalog;
#[cfg(feature = "config")]
pub mod config;
pub mod dropdown;
pub mod error;
pub mod filter;
pub mod models;
pub mod render;
pub mod view;
