use anyhow::{bail, Result};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeProvider {
    Groq,
    Canned,
}

impl NarrativeProvider {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "canned" => Ok(Self::Canned),
            other => bail!("Unknown NARRATIVE_PROVIDER '{}', expected 'groq' or 'canned'", other),
        }
    }
}

/// Settings for the text-generation provider
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    pub provider: NarrativeProvider,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_base_url: String,
}

impl NarrativeConfig {
    pub fn from_env() -> Result<Self> {
        let provider = NarrativeProvider::parse(
            &env::var("NARRATIVE_PROVIDER").unwrap_or_else(|_| "groq".to_string()),
        )?;
        let groq_api_key = env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let groq_model =
            env::var("GROQ_MODEL").unwrap_or_else(|_| "llama-3.1-8b-instant".to_string());
        let groq_base_url = env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string());

        Ok(NarrativeConfig {
            provider,
            groq_api_key,
            groq_model,
            groq_base_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub narrative: NarrativeConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .unwrap_or(8000);
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let narrative = NarrativeConfig::from_env()?;

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            narrative,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
