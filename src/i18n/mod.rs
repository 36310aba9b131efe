//! Localization: target-language handling, the native weather dictionary,
//! and per-language message templates.

pub mod dictionary;
pub mod language;
pub mod templates;

pub use dictionary::LocalizationDictionary;
pub use language::TargetLanguage;
pub use templates::{LanguagePack, MessageTemplates};
