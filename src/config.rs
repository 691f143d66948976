use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        bind_addr: get_env_or_default("CODEXR_BIND_ADDR", "0.0.0.0:3000"),
        default_backend: get_env_or_default("CODEXR_DEFAULT_BACKEND", "mock"),
        ollama_base_url: get_env_or_default("OLLAMA_BASE_URL", "http://localhost:11434"),
        ollama_model: get_env_or_default("OLLAMA_MODEL", "codellama:7b-code"),
        hf_api_url: get_env_or_default("HF_API_URL", "https://api-inference.huggingface.co"),
        hf_model: get_env_or_default("HF_MODEL", "bigcode/starcoder2-15b"),
        hf_token: get_env_opt("HF_TOKEN"),
        search_timeout: Duration::from_secs(get_env_u64("SEARCH_TIMEOUT_SECS", 10)),
        generation_timeout: Duration::from_secs(get_env_u64("GENERATION_TIMEOUT_SECS", 120)),
        search_user_agent: get_env_or_default(
            "SEARCH_USER_AGENT",
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
        ),
    }
});

pub struct Config {
    pub bind_addr: String,
    /// One of `mock`, `local`, `remote`.
    pub default_backend: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub hf_api_url: String,
    pub hf_model: String,
    pub hf_token: Option<String>,
    pub search_timeout: Duration,
    pub generation_timeout: Duration,
    pub search_user_agent: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{key}={raw} is not a number, using {default}");
            default
        }),
        Err(_) => default,
    }
}
