//! Per-language message templates
//!
//! Adding a language is a new [`LanguagePack`] entry in [`LANGUAGE_PACKS`];
//! the composer never branches on language codes itself.

use super::language::{NATIVE_LANGUAGE, TargetLanguage};
use crate::error::ComposeError;

/// Renders the weather sentence from the localized place name, the
/// formatted temperature and the localized condition text.
pub type RenderFn = fn(place: &str, temperature: &str, condition: &str) -> String;

/// Everything a single language needs for user-visible text
#[derive(Debug)]
pub struct LanguagePack {
    /// Primary language subtag (`EN`, `KO`, ...)
    pub code: &'static str,
    pub render: RenderFn,
    pub missing_location: &'static str,
    pub weather_unavailable: &'static str,
}

impl LanguagePack {
    #[must_use]
    pub fn message(&self, place: &str, temperature: &str, condition: &str) -> String {
        (self.render)(place, temperature, condition)
    }

    #[must_use]
    pub fn failure(&self, error: ComposeError) -> &'static str {
        match error {
            ComposeError::MissingLocation => self.missing_location,
            ComposeError::WeatherUnavailable => self.weather_unavailable,
        }
    }
}

fn render_ko(place: &str, temperature: &str, condition: &str) -> String {
    format!("{place}의 현재 온도는 {temperature}°C이며, 날씨는 {condition}.")
}

fn render_en(place: &str, temperature: &str, condition: &str) -> String {
    format!("The current temperature in {place} is {temperature}°C, and the weather is {condition}.")
}

fn render_zh(place: &str, temperature: &str, condition: &str) -> String {
    format!("{place}的当前温度是{temperature}°C，天气是{condition}。")
}

fn render_ja(place: &str, temperature: &str, condition: &str) -> String {
    format!("{place}の現在の気温は{temperature}°Cで、天気は{condition}です。")
}

fn render_ru(place: &str, temperature: &str, condition: &str) -> String {
    format!("Температура в {place} сейчас {temperature}°C, а погода {condition}.")
}

pub const LANGUAGE_PACKS: &[LanguagePack] = &[
    LanguagePack {
        code: "KO",
        render: render_ko,
        missing_location: "위치 정보가 없습니다.",
        weather_unavailable: "날씨 정보를 가져오는 데 실패했습니다.",
    },
    LanguagePack {
        code: "EN",
        render: render_en,
        missing_location: "Location information is missing.",
        weather_unavailable: "Failed to retrieve weather information.",
    },
    LanguagePack {
        code: "ZH",
        render: render_zh,
        missing_location: "缺少位置信息。",
        weather_unavailable: "获取天气信息失败。",
    },
    LanguagePack {
        code: "JA",
        render: render_ja,
        missing_location: "位置情報がありません。",
        weather_unavailable: "天気情報の取得に失敗しました。",
    },
    LanguagePack {
        code: "RU",
        render: render_ru,
        missing_location: "Нет данных о местоположении.",
        weather_unavailable: "Не удалось получить данные о погоде.",
    },
];

/// Lookup table from language code to [`LanguagePack`] with an explicit
/// default entry.
#[derive(Debug, Clone, Copy)]
pub struct MessageTemplates {
    packs: &'static [LanguagePack],
    default: &'static LanguagePack,
}

impl MessageTemplates {
    /// Built-in packs; unknown languages use the native one.
    #[must_use]
    pub fn builtin() -> Self {
        let default = LANGUAGE_PACKS
            .iter()
            .find(|p| p.code == NATIVE_LANGUAGE)
            .unwrap_or(&LANGUAGE_PACKS[0]);
        Self {
            packs: LANGUAGE_PACKS,
            default,
        }
    }

    #[must_use]
    pub fn for_language(&self, language: &TargetLanguage) -> &'static LanguagePack {
        self.packs
            .iter()
            .find(|p| p.code == language.primary())
            .unwrap_or(self.default)
    }
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}
