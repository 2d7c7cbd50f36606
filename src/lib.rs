//! # Coffee & Wifi
//!
//! A small web app for browsing cafés and submitting new ones, rated for
//! coffee, wifi strength, and power sockets.
//!
//! Cafés live in a flat CSV file. Ratings are entered as numbers and stored
//! as strings of emoji: three cups of coffee is `☕️☕️☕️`, no power sockets
//! is `✘`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────────────┐   ┌───────────┐
//! │  HTTP    │──▶│ Form               │──▶│ CSV store │
//! │  /add    │   │ validate → encode  │   │ (append)  │
//! └──────────┘   └────────────────────┘   └─────┬─────┘
//!                                               │
//!                  ┌────────────────────────────┤
//!                  ▼                            ▼
//!             ┌──────────┐               ┌────────────┐
//!             │  /cafes  │               │ cafes list │
//!             └──────────┘               └────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and the `SECRET_KEY` secret |
//! | [`models`] | Café records and rows |
//! | [`rating`] | Rating-to-glyph encoding and choice tables |
//! | [`time_format`] | 12-hour time validation |
//! | [`validate`] | Composable field checks |
//! | [`form`] | The add-café form: validation then encoding |
//! | [`store`] | Append-only CSV store |
//! | [`csrf`] | Signed form tokens |
//! | [`pages`] | HTML rendering |
//! | [`server`] | HTTP server |

pub mod add_cmd;
pub mod config;
pub mod csrf;
pub mod form;
pub mod list_cmd;
pub mod models;
pub mod pages;
pub mod rating;
pub mod server;
pub mod store;
pub mod time_format;
pub mod validate;
