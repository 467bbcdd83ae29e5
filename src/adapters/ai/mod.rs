//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models (default)
//! - `OpenAIProvider` - OpenAI chat models
//! - `MockAIProvider` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;
mod openai_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_OPENAI_MODEL};

use std::sync::Arc;

use secrecy::Secret;

use crate::config::{AiConfig, AiProvider as ProviderKind};
use crate::ports::{AIError, AIProvider};

/// Builds the configured provider.
///
/// Fails with `AuthenticationFailed` when the selected provider has no key.
pub fn provider_from_config(config: &AiConfig) -> Result<Arc<dyn AIProvider>, AIError> {
    match config.provider {
        ProviderKind::Gemini => {
            let key = config
                .gemini_api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or(AIError::AuthenticationFailed)?;
            let mut gemini = GeminiConfig::from_secret(Secret::new(key))
                .with_timeout(config.timeout());
            if let Some(model) = &config.model {
                gemini = gemini.with_model(model);
            }
            if let Some(base_url) = &config.base_url {
                gemini = gemini.with_base_url(base_url);
            }
            Ok(Arc::new(GeminiProvider::new(gemini)?))
        }
        ProviderKind::OpenAI => {
            let key = config
                .openai_api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or(AIError::AuthenticationFailed)?;
            let mut openai = OpenAIConfig::from_secret(Secret::new(key))
                .with_timeout(config.timeout());
            if let Some(model) = &config.model {
                openai = openai.with_model(model);
            }
            if let Some(base_url) = &config.base_url {
                openai = openai.with_base_url(base_url);
            }
            Ok(Arc::new(OpenAIProvider::new(openai)?))
        }
    }
}
