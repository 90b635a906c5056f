//! AI question-generation configuration.

use serde::{Deserialize, Serialize};

/// AI collaborator configuration.
///
/// A missing API key is not a startup failure: the dependent feature
/// degrades and fails with a `Configuration` error only when invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key for the generative-AI provider.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier requested from the provider.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum number of questions a single request may ask for.
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_questions: default_max_questions(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_questions() -> u32 {
    20
}
