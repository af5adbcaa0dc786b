//! Locale selection for the storefront UI.
//!
//! Culture resolution is a pure, total mapping from a free-text language
//! name to a two-letter tag; persistence goes through the [`CookieSink`]
//! boundary so this crate stays free of HTTP concerns.

pub mod culture;
pub mod service;

pub use culture::Culture;
pub use service::{CULTURE_COOKIE_NAME, CookieSink, LanguageService, cookie_value};
