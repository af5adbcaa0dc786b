use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

/// UI culture selected by the shopper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Culture {
    #[default]
    En,
    Fr,
    Es,
}

impl Culture {
    /// Two-letter culture tag.
    pub fn tag(self) -> &'static str {
        match self {
            Culture::En => "en",
            Culture::Fr => "fr",
            Culture::Es => "es",
        }
    }

    /// Resolve a free-text language name to a culture.
    ///
    /// Total: trims and case-folds the input, then matches the recognized
    /// names. Anything else, the empty string included, falls back to
    /// English. Case-folding is Unicode-aware so `"FRANÇAIS"` resolves the
    /// same as `"français"`.
    pub fn resolve(language: &str) -> Self {
        match language.trim().to_lowercase().as_str() {
            "french" | "francais" | "français" => Culture::Fr,
            "spanish" => Culture::Es,
            _ => Culture::En,
        }
    }
}

impl ValueObject for Culture {}

impl core::fmt::Display for Culture {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}
