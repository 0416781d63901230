//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Longest input, in characters, the endpoint accepts. Also passed to the
/// classifier as its truncation length.
pub const MAX_TEXT_LENGTH: usize = 128;

/// Returned for empty input and for input longer than [`MAX_TEXT_LENGTH`].
pub const TEXT_LENGTH_MESSAGE: &str = "Current API handles text length of max 128 characters!";

/// Model used when none is specified.
pub const DEFAULT_MODEL: &str = "papluca/xlm-roberta-base-language-detection";

/// Hugging Face Inference API base; the model id is appended.
pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/hf-inference/models";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!AUTHOR.is_empty());
        assert!(!HOMEPAGE.is_empty());
        assert!(!REPO.is_empty());
        assert!(!DEFAULT_MODEL.is_empty());
    }

    #[test]
    fn consts_from_cargo_toml() {
        assert!(AUTHOR.contains("Assaf Sapir"));
        assert!(REPO.contains("github.com/assapir/babel"));
    }

    #[test]
    fn default_endpoint_uses_inference_router() {
        assert_eq!(
            DEFAULT_ENDPOINT,
            "https://router.huggingface.co/hf-inference/models"
        );
    }

    #[test]
    fn length_message_mentions_limit() {
        assert!(TEXT_LENGTH_MESSAGE.contains(&MAX_TEXT_LENGTH.to_string()));
    }
}
