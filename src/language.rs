//! Sentence pools and per-language result formatting.

use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

static LANG_DIR: Dir = include_dir!("src/lang");

/// One embedded language file.
#[derive(Deserialize, Clone, Debug)]
struct LanguageFile {
    code: String,
    sentences: Vec<String>,
}

/// A race was requested for a language with no sentences registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyPoolError {
    pub language: String,
}

impl fmt::Display for EmptyPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no sentences registered for language `{}`", self.language)
    }
}

impl Error for EmptyPoolError {}

/// Immutable mapping from language code to its target sentences, loaded once
/// at construction.
#[derive(Clone, Debug, Default)]
pub struct SentencePool {
    sentences: HashMap<String, Vec<String>>,
}

impl SentencePool {
    /// Pool backed by the language files compiled into the binary.
    pub fn embedded() -> Self {
        let mut sentences = HashMap::new();
        for file in LANG_DIR.files() {
            let text = file
                .contents_utf8()
                .expect("Unable to interpret language file as a string");
            let parsed: LanguageFile =
                serde_json::from_str(text).expect("Unable to deserialize language json");
            sentences.insert(parsed.code, parsed.sentences);
        }
        Self { sentences }
    }

    /// Pool over a caller-supplied mapping.
    pub fn from_map(sentences: HashMap<String, Vec<String>>) -> Self {
        Self { sentences }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.sentences.keys().map(String::as_str)
    }

    /// Uniformly random sentence for `code`.
    pub fn pick<R: Rng>(&self, code: &str, rng: &mut R) -> Result<String, EmptyPoolError> {
        match self.sentences.get(code) {
            Some(list) if !list.is_empty() => {
                let idx = rng.gen_range(0..list.len());
                Ok(list[idx].clone())
            }
            _ => Err(EmptyPoolError {
                language: code.to_string(),
            }),
        }
    }
}

/// Rank label in the language's own convention: `2nd` in English, `2º` in
/// Spanish, a plain `#2` for codes without a registered convention.
pub fn rank_label(code: &str, rank: u32) -> String {
    match code {
        "en" => {
            let suffix = match rank % 100 {
                11..=13 => "th",
                v => match v % 10 {
                    1 => "st",
                    2 => "nd",
                    3 => "rd",
                    _ => "th",
                },
            };
            format!("{rank}{suffix}")
        }
        "es" => format!("{rank}º"),
        _ => format!("#{rank}"),
    }
}

/// Headline for the result screen.
pub fn result_title(code: &str, rank: u32) -> String {
    match code {
        "es" => format!("¡Terminaste en {}º lugar!", rank),
        _ => format!("You finished {}!", rank_label(code, rank)),
    }
}

/// Speed line for the result screen.
pub fn result_message(code: &str, wpm: u32) -> String {
    match code {
        "es" => format!("Velocidad: {wpm} PPM"),
        _ => format!("Speed: {wpm} WPM"),
    }
}
