//! Core domain + application logic for the whisper bot.
//!
//! This crate is intentionally framework-agnostic. The Telegram transport
//! lives in an adapter crate and profile persistence sits behind the
//! `ProfileStore` port.

pub mod config;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod events;
pub mod formatting;
pub mod logging;
pub mod replies;
pub mod service;
pub mod store;

pub use errors::{Error, Result};
