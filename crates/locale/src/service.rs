use tracing::debug;

use crate::culture::Culture;

/// Name of the cookie under which the resolved culture is persisted.
pub const CULTURE_COOKIE_NAME: &str = "culture";

/// Response-cookie boundary.
///
/// The serving layer implements this over its real response type; tests use
/// an in-memory recorder.
pub trait CookieSink {
    /// Append a `name=value` cookie to the outgoing response.
    fn append(&mut self, name: &str, value: &str);
}

/// Encode a culture for the cookie: `c=<tag>|uic=<tag>`.
///
/// Culture and UI culture are always the same tag here; the two-field form
/// keeps the value self-describing for the serving layer.
pub fn cookie_value(culture: Culture) -> String {
    format!("c={tag}|uic={tag}", tag = culture.tag())
}

/// Application-language service.
///
/// Stateless: resolution is pure, persistence goes through the sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageService;

impl LanguageService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `language` and persist the result to the response cookie.
    ///
    /// Writes the cookie exactly once per call and returns the resolved
    /// culture.
    pub fn change_ui_language(&self, sink: &mut dyn CookieSink, language: &str) -> Culture {
        let culture = Culture::resolve(language);
        sink.append(CULTURE_COOKIE_NAME, &cookie_value(culture));
        debug!(culture = culture.tag(), "ui language changed");
        culture
    }
}
