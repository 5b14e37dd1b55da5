//! Core data models for DeepL translations

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Language code as understood by DeepL (e.g. `"DE"`, `"EN-GB"`)
///
/// Codes are not validated locally; an unsupported code is rejected by the
/// API itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(Cow<'static, str>);

impl Language {
    pub const BULGARIAN: Language = Language::from_static("BG");
    pub const CZECH: Language = Language::from_static("CS");
    pub const DANISH: Language = Language::from_static("DA");
    pub const GERMAN: Language = Language::from_static("DE");
    pub const GREEK: Language = Language::from_static("EL");
    pub const ENGLISH: Language = Language::from_static("EN");
    pub const BRITISH_ENGLISH: Language = Language::from_static("EN-GB");
    pub const AMERICAN_ENGLISH: Language = Language::from_static("EN-US");
    pub const SPANISH: Language = Language::from_static("ES");
    pub const ESTONIAN: Language = Language::from_static("ET");
    pub const FINNISH: Language = Language::from_static("FI");
    pub const FRENCH: Language = Language::from_static("FR");
    pub const HUNGARIAN: Language = Language::from_static("HU");
    pub const ITALIAN: Language = Language::from_static("IT");
    pub const JAPANESE: Language = Language::from_static("JA");
    pub const LITHUANIAN: Language = Language::from_static("LT");
    pub const LATVIAN: Language = Language::from_static("LV");
    pub const DUTCH: Language = Language::from_static("NL");
    pub const POLISH: Language = Language::from_static("PL");
    pub const PORTUGUESE: Language = Language::from_static("PT");
    pub const EUROPEAN_PORTUGUESE: Language = Language::from_static("PT-PT");
    pub const BRAZILIAN_PORTUGUESE: Language = Language::from_static("PT-BR");
    pub const ROMANIAN: Language = Language::from_static("RO");
    pub const RUSSIAN: Language = Language::from_static("RU");
    pub const SLOVAK: Language = Language::from_static("SK");
    pub const SLOVENIAN: Language = Language::from_static("SL");
    pub const SWEDISH: Language = Language::from_static("SV");
    pub const CHINESE: Language = Language::from_static("ZH");

    /// Every named language constant with a human-readable name
    pub const KNOWN: &'static [(Language, &'static str)] = &[
        (Language::BULGARIAN, "Bulgarian"),
        (Language::CZECH, "Czech"),
        (Language::DANISH, "Danish"),
        (Language::GERMAN, "German"),
        (Language::GREEK, "Greek"),
        (Language::ENGLISH, "English"),
        (Language::BRITISH_ENGLISH, "English (British)"),
        (Language::AMERICAN_ENGLISH, "English (American)"),
        (Language::SPANISH, "Spanish"),
        (Language::ESTONIAN, "Estonian"),
        (Language::FINNISH, "Finnish"),
        (Language::FRENCH, "French"),
        (Language::HUNGARIAN, "Hungarian"),
        (Language::ITALIAN, "Italian"),
        (Language::JAPANESE, "Japanese"),
        (Language::LITHUANIAN, "Lithuanian"),
        (Language::LATVIAN, "Latvian"),
        (Language::DUTCH, "Dutch"),
        (Language::POLISH, "Polish"),
        (Language::PORTUGUESE, "Portuguese"),
        (Language::EUROPEAN_PORTUGUESE, "Portuguese (European)"),
        (Language::BRAZILIAN_PORTUGUESE, "Portuguese (Brazilian)"),
        (Language::ROMANIAN, "Romanian"),
        (Language::RUSSIAN, "Russian"),
        (Language::SLOVAK, "Slovak"),
        (Language::SLOVENIAN, "Slovenian"),
        (Language::SWEDISH, "Swedish"),
        (Language::CHINESE, "Chinese"),
    ];

    const fn from_static(code: &'static str) -> Self {
        Language(Cow::Borrowed(code))
    }

    /// Arbitrary language code
    pub fn new(code: impl Into<String>) -> Self {
        Language(Cow::Owned(code.into()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Language::new(code)
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::new(code)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.code()
    }
}

/// Error returned when parsing an unknown option token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: {value}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

/// Declares a closed option enum whose wire value doubles as its display form.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value sent to the API
            pub fn value(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }

        impl FromStr for $name {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $( $value => Ok($name::$variant), )+
                    _ => Err(ParseOptionError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// How the API splits input text into sentences
    SplitSentence, "split_sentences" {
        /// No splitting; each text is treated as one sentence
        None => "0",
        /// Split on punctuation and newlines
        Default => "1",
        /// Split on punctuation only
        NoNewlines => "nonewlines",
    }
}

wire_enum! {
    /// Formality of the translated text
    Formal, "formality" {
        Default => "default",
        Less => "less",
        More => "more",
    }
}

wire_enum! {
    /// How markup embedded in the text is treated
    TagHandling, "tag_handling" {
        Xml => "xml",
        Html => "html",
    }
}

/// A single translated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    pub detected_source_language: Language,
}

/// Body of a successful `/translate` response
#[derive(Debug, Deserialize)]
pub(crate) struct TranslateResponse {
    pub translations: Vec<Translation>,
}
