//! Offline trigram classifier backed by the `whatlang` crate.
//!
//! No model download, no network. Useful for local development and for
//! deployments where the hosted model is unavailable.

use anyhow::{Result, bail};
use async_trait::async_trait;
use ::whatlang::{Detector, Lang};

use super::{ClassifyOptions, Classifier, Prediction};

pub struct WhatlangClassifier {
    detector: Detector,
}

impl Default for WhatlangClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl WhatlangClassifier {
    pub fn new() -> Self {
        Self {
            detector: Detector::new(),
        }
    }
}

#[async_trait]
impl Classifier for WhatlangClassifier {
    fn name(&self) -> &str {
        "whatlang"
    }

    async fn classify(&self, text: &str, options: &ClassifyOptions) -> Result<Vec<Prediction>> {
        let length = text.chars().count();
        let input: String = if length > options.max_length {
            if !options.truncation {
                bail!(
                    "input of {} characters exceeds max_length {}",
                    length,
                    options.max_length
                );
            }
            text.chars().take(options.max_length).collect()
        } else {
            text.to_string()
        };

        // whatlang only ever reports its single best guess.
        let predictions = self
            .detector
            .detect(&input)
            .map(|info| Prediction::new(label(info.lang()), info.confidence()))
            .into_iter()
            .take(options.top_k)
            .collect();

        Ok(predictions)
    }
}

/// ISO 639-1 where one exists, else whatlang's ISO 639-3 code.
fn label(lang: Lang) -> &'static str {
    match lang {
        Lang::Ara => "ar",
        Lang::Bul => "bg",
        Lang::Cmn => "zh",
        Lang::Deu => "de",
        Lang::Ell => "el",
        Lang::Eng => "en",
        Lang::Fra => "fr",
        Lang::Hin => "hi",
        Lang::Ita => "it",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Nld => "nl",
        Lang::Pol => "pl",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Spa => "es",
        Lang::Swe => "sv",
        Lang::Tha => "th",
        Lang::Tur => "tr",
        Lang::Ukr => "uk",
        Lang::Urd => "ur",
        Lang::Vie => "vi",
        other => other.code(),
    }
}
