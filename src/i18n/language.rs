//! Target-language codes

use std::fmt;

/// Language used when the caller does not name one, and the language the
/// static weather dictionary is written in.
pub const NATIVE_LANGUAGE: &str = "KO";

/// A normalised translation-provider language code (`KO`, `EN`, `EN-GB`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetLanguage(String);

impl TargetLanguage {
    /// Trim and upper-case the raw `target_lang` value; blank or absent
    /// falls back to [`NATIVE_LANGUAGE`].
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(code) => Self(code.to_ascii_uppercase().replace('_', "-")),
            None => Self::native(),
        }
    }

    #[must_use]
    pub fn native() -> Self {
        Self(NATIVE_LANGUAGE.to_string())
    }

    /// Full code, as sent to the translation provider
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Primary subtag: `EN` for `EN-GB`
    #[must_use]
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        self.primary() == NATIVE_LANGUAGE
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
