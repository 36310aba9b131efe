//! Static weather-condition dictionary for the native language

use std::collections::HashMap;

/// Canonical (lower-case) provider condition text to Korean
const KOREAN_CONDITIONS: &[(&str, &str)] = &[
    ("clear", "맑음"),
    ("sunny", "화창함"),
    ("mostly sunny", "대체로 맑음"),
    ("partly cloudy", "부분적으로 흐림"),
    ("mostly cloudy", "대체로 흐림"),
    ("cloudy", "흐림"),
    ("overcast", "흐림"),
    ("light rain", "약한 비"),
    ("rain", "비"),
    ("heavy rain", "폭우"),
    ("showers", "소나기"),
    ("drizzle", "이슬비"),
    ("light snow", "약한 눈"),
    ("snow", "눈"),
    ("heavy snow", "폭설"),
    ("sleet", "진눈깨비"),
    ("thunderstorm", "천둥번개"),
    ("scattered thunderstorms", "산발적인 천둥번개"),
    ("mist", "안개"),
    ("fog", "안개"),
    ("haze", "안개낌"),
    ("smoke", "연무"),
    ("dust", "먼지"),
    ("sand", "모래바람"),
    ("windy", "바람이 강함"),
    ("breezy", "산들바람"),
    ("blizzard", "눈보라"),
    ("tornado", "토네이도"),
];

/// Read-only lookup from provider condition text to the native language.
/// Keys are stored lower-case and lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct LocalizationDictionary {
    entries: HashMap<&'static str, &'static str>,
}

impl LocalizationDictionary {
    /// Dictionary for the native language (`KO`)
    #[must_use]
    pub fn native() -> Self {
        Self {
            entries: KOREAN_CONDITIONS.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn lookup(&self, condition_text: &str) -> Option<&'static str> {
        let key = condition_text.trim().to_lowercase();
        self.entries.get(key.as_str()).copied()
    }
}

impl Default for LocalizationDictionary {
    fn default() -> Self {
        Self::native()
    }
}
