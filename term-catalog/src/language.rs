use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Every language a catalog column can be written in. English is the pivot
/// all translations go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Language {
    En,
    De,
    Fr,
    Es,
    It,
    PtBr,
    Ja,
    Ko,
    ZhTw,
    Ru,
    Th,
    Tr,
    Hi,
    Id,
    EsMx,
}

impl Language {
    pub const CANONICAL: Language = Language::En;

    pub const ALL: [Language; 15] = [
        Language::En,
        Language::De,
        Language::Fr,
        Language::Es,
        Language::It,
        Language::PtBr,
        Language::Ja,
        Language::Ko,
        Language::ZhTw,
        Language::Ru,
        Language::Th,
        Language::Tr,
        Language::Hi,
        Language::Id,
        Language::EsMx,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::It => "it",
            Language::PtBr => "pt-br",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::ZhTw => "zh-tw",
            Language::Ru => "ru",
            Language::Th => "th",
            Language::Tr => "tr",
            Language::Hi => "hi",
            Language::Id => "id",
            Language::EsMx => "es-mx",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language code `{}`", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

/// Accepts codes in any case and with `_` in place of `-` (`PT_BR`, `zh-TW`).
impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let normalized = code.trim().to_ascii_lowercase().replace('_', "-");
        Language::ALL
            .into_iter()
            .find(|language| language.code() == normalized)
            .ok_or_else(|| UnknownLanguage(code.to_string()))
    }
}

impl TryFrom<String> for Language {
    type Error = UnknownLanguage;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<Language> for &'static str {
    fn from(language: Language) -> Self {
        language.code()
    }
}

bitflags! {
    /// A set of languages, one bit each.
    pub struct LanguageSet: u16 {
        const EN = 1 << 0;
        const DE = 1 << 1;
        const FR = 1 << 2;
        const ES = 1 << 3;
        const IT = 1 << 4;
        const PT_BR = 1 << 5;
        const JA = 1 << 6;
        const KO = 1 << 7;
        const ZH_TW = 1 << 8;
        const RU = 1 << 9;
        const TH = 1 << 10;
        const TR = 1 << 11;
        const HI = 1 << 12;
        const ID = 1 << 13;
        const ES_MX = 1 << 14;
    }
}

impl From<Language> for LanguageSet {
    fn from(language: Language) -> Self {
        LanguageSet::from_bits_truncate(language.bit())
    }
}

impl FromIterator<Language> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = Language>>(iter: I) -> Self {
        iter.into_iter()
            .fold(LanguageSet::empty(), |set, language| set | language.into())
    }
}

impl LanguageSet {
    pub fn has(&self, language: Language) -> bool {
        self.contains(language.into())
    }

    /// Members in declaration order.
    pub fn languages(self) -> impl Iterator<Item = Language> {
        Language::ALL
            .into_iter()
            .filter(move |&language| self.has(language))
    }

    pub fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }

    /// The only member, if there is exactly one.
    pub fn single(self) -> Option<Language> {
        let mut members = self.languages();
        match (members.next(), members.next()) {
            (Some(language), None) => Some(language),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.languages().map(Language::code).collect();
        write!(f, "{{{}}}", codes.join(", "))
    }
}
