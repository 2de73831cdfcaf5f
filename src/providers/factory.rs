use tracing::warn;

use super::{
    base::Provider,
    configs::{
        gemini::GEMINI_API_KEY_VAR, openrouter::OPENROUTER_API_KEY_VAR, GeminiProviderConfig, OpenRouterProviderConfig,
        ProviderConfig,
    },
    gemini::GeminiProvider,
    openrouter::OpenRouterProvider,
};
use crate::config::Settings;
use crate::errors::ConfigError;
use crate::resolver::Resolver;

/// Build the provider chain from the environment
pub fn get_providers(settings: &Settings) -> Result<Vec<Box<dyn Provider>>, ConfigError> {
    build_providers(
        settings,
        OpenRouterProviderConfig::from_env()?,
        GeminiProviderConfig::from_env()?,
    )
}

/// Build the provider chain from explicit configs. OpenRouter is tried
/// first, Gemini second.
pub fn build_providers(
    settings: &Settings,
    openrouter: OpenRouterProviderConfig,
    gemini: GeminiProviderConfig,
) -> Result<Vec<Box<dyn Provider>>, ConfigError> {
    if openrouter.api_key.is_none() {
        if settings.require_primary_credential {
            return Err(ConfigError::MissingEnvVar {
                env_var: OPENROUTER_API_KEY_VAR.to_string(),
            });
        }
        warn!("{} is not set, primary provider will be skipped", OPENROUTER_API_KEY_VAR);
    }
    if gemini.api_key.is_none() {
        warn!("{} is not set, secondary provider will be skipped", GEMINI_API_KEY_VAR);
    }

    let timeout = settings.resolver.timeout();
    let temperature = Some(settings.resolver.temperature);

    let providers: Vec<Box<dyn Provider>> = vec![
        Box::new(OpenRouterProvider::new(OpenRouterProviderConfig {
            timeout,
            temperature,
            ..openrouter
        })?) as Box<dyn Provider>,
        Box::new(GeminiProvider::new(GeminiProviderConfig {
            timeout,
            temperature,
            ..gemini
        })?),
    ];

    Ok(providers)
}

/// Build a ready-to-use resolver from settings and environment
pub fn get_resolver(settings: &Settings) -> Result<Resolver, ConfigError> {
    let providers = get_providers(settings)?;
    Ok(Resolver::new(providers, settings.resolver.options()))
}
