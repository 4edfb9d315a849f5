use std::env;
use std::time::Duration;

use url::Url;

use crate::prompt::MAX_INPUT_CHARS;

pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3";
pub const DEFAULT_ENVELOPE_MODEL: &str = "deepseek-v3";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and target of one OpenAI-compatible vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Backs the `/api/aigc` routes.
    pub aigc: ProviderConfig,
    /// Backs the `/cet6` routes.
    pub cet6: ProviderConfig,
    pub request_timeout: Duration,
    pub max_input_chars: usize,
    pub envelope_model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let aigc = ProviderConfig {
            api_key: var("AI_SILICONFLOW_API_KEY")
                .ok_or_else(|| "AI_SILICONFLOW_API_KEY: not set".to_string())?,
            endpoint: parse_endpoint(
                "AI_SILICONFLOW_ENDPOINT",
                var("AI_SILICONFLOW_ENDPOINT")
                    .ok_or_else(|| "AI_SILICONFLOW_ENDPOINT: not set".to_string())?,
            )?,
            model: var("AI_SILICONFLOW_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };

        // Without dedicated credentials the CET6 routes share the main provider.
        let cet6 = match var("AI_GEMINI_API_KEY") {
            Some(api_key) => ProviderConfig {
                api_key,
                endpoint: parse_endpoint(
                    "AI_GEMINI_ENDPOINT",
                    var("AI_GEMINI_ENDPOINT")
                        .ok_or_else(|| "AI_GEMINI_ENDPOINT: not set".to_string())?,
                )?,
                model: var("AI_GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            None => aigc.clone(),
        };

        let timeout_secs = match var("AI_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| format!("AI_TIMEOUT_SECS: invalid value {raw:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let max_input_chars = match var("AI_MAX_INPUT_CHARS") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("AI_MAX_INPUT_CHARS: invalid value {raw:?}"))?,
            None => MAX_INPUT_CHARS,
        };

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            aigc,
            cet6,
            request_timeout: Duration::from_secs(timeout_secs),
            max_input_chars,
            envelope_model: var("CET6_ENVELOPE_MODEL")
                .unwrap_or_else(|| DEFAULT_ENVELOPE_MODEL.to_string()),
        })
    }
}

fn parse_endpoint(key: &str, raw: String) -> Result<String, String> {
    let url = Url::parse(&raw).map_err(|e| format!("{key}: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(raw),
        other => Err(format!("{key}: unsupported scheme {other}")),
    }
}
