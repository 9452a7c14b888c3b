//! Google Sheets v4 backend for `SheetStore`.

pub mod auth;
pub mod client;
mod rows;

pub use auth::{ServiceAccountTokenSource, StaticToken, TokenSource};
pub use client::SheetsClient;
