//! Request/response adapter between the HTTP layer and a [`Classifier`].
//!
//! Validates the input length, asks the classifier for its single best label
//! and shapes the answer into [`LanguageDetectionResponse`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::classifier::{ClassifyOptions, Classifier};
use crate::consts::{MAX_TEXT_LENGTH, TEXT_LENGTH_MESSAGE};

/// Request body of `POST /detectLanguage`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TextInput {
    #[schema(example = "Hello, how are you?")]
    pub text: String,
}

/// Wire shape of a detection. Absent fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LanguageDetectionResponse {
    #[schema(example = true)]
    pub status: bool,
    pub message: Option<String>,
    #[schema(example = "en")]
    pub predicted_language: Option<String>,
    #[schema(example = 0.9998)]
    pub predicted_language_score: Option<f64>,
}

/// Outcome of a single detection request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "LanguageDetectionResponse")]
pub enum Detection {
    /// The classifier named a language.
    Detected { language: String, score: f64 },
    /// Input failed validation; the classifier was never called.
    Rejected { message: String },
    /// The classifier answered with an empty list.
    Undetermined,
}

impl From<Detection> for LanguageDetectionResponse {
    fn from(detection: Detection) -> Self {
        match detection {
            Detection::Detected { language, score } => Self {
                status: true,
                message: None,
                predicted_language: Some(language),
                predicted_language_score: Some(score),
            },
            Detection::Rejected { message } => Self {
                status: false,
                message: Some(message),
                predicted_language: None,
                predicted_language_score: None,
            },
            Detection::Undetermined => Self {
                status: false,
                message: None,
                predicted_language: None,
                predicted_language_score: None,
            },
        }
    }
}

/// Accept 1..=128 characters (Unicode scalar values, not bytes).
pub fn validate(text: &str) -> Result<(), &'static str> {
    let length = text.chars().count();
    if length == 0 || length > MAX_TEXT_LENGTH {
        return Err(TEXT_LENGTH_MESSAGE);
    }
    Ok(())
}

/// Detect the language of `text`.
///
/// Validation failures are a normal [`Detection::Rejected`]. Classifier
/// errors propagate unchanged so the caller can surface them as a server
/// error.
pub async fn detect_language(classifier: &dyn Classifier, text: &str) -> Result<Detection> {
    if let Err(message) = validate(text) {
        warn!(length = text.chars().count(), "rejected input");
        return Ok(Detection::Rejected {
            message: message.to_string(),
        });
    }

    let predictions = classifier.classify(text, &ClassifyOptions::default()).await?;

    let Some(best) = predictions.into_iter().next() else {
        warn!(classifier = classifier.name(), "classifier returned no predictions");
        return Ok(Detection::Undetermined);
    };

    debug!(language = %best.label, score = best.score, "detected language");
    Ok(Detection::Detected {
        language: best.label,
        score: best.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_bounds() {
        assert!(validate("").is_err());
        assert!(validate("a").is_ok());
        assert!(validate(&"a".repeat(128)).is_ok());
        assert_eq!(validate(&"a".repeat(129)), Err(TEXT_LENGTH_MESSAGE));
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        // 128 three-byte characters: 384 bytes, still within the limit.
        let text = "語".repeat(128);
        assert!(text.len() > MAX_TEXT_LENGTH);
        assert!(validate(&text).is_ok());
        assert!(validate(&"語".repeat(129)).is_err());
    }

    #[test]
    fn detected_serializes_with_null_message() {
        let detection = Detection::Detected {
            language: "en".to_string(),
            score: 0.9998,
        };
        let json = serde_json::to_value(&detection).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": true,
                "message": null,
                "predicted_language": "en",
                "predicted_language_score": 0.9998
            })
        );
    }

    #[test]
    fn rejected_serializes_with_null_prediction() {
        let detection = Detection::Rejected {
            message: TEXT_LENGTH_MESSAGE.to_string(),
        };
        let json = serde_json::to_value(&detection).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": false,
                "message": "Current API handles text length of max 128 characters!",
                "predicted_language": null,
                "predicted_language_score": null
            })
        );
    }

    #[test]
    fn undetermined_serializes_all_null() {
        let json = serde_json::to_value(Detection::Undetermined).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": false,
                "message": null,
                "predicted_language": null,
                "predicted_language_score": null
            })
        );
    }

    #[test]
    fn text_input_requires_text_field() {
        assert!(serde_json::from_str::<TextInput>(r#"{"txt": "hi"}"#).is_err());
        let input: TextInput = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(input.text, "hi");
    }
}
