use std::env;
use std::path::PathBuf;

/// Runtime settings, resolved from the environment once at startup and
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the local page is served on.
    pub port: u16,
    /// Base URL of the remote calculation service.
    pub api_base_url: String,
    /// Path of the JSON file holding the identity token.
    pub identity_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let api_base_url =
            env::var("CALC_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

        let identity_path = env::var("IDENTITY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/identity.json"));

        Self {
            port,
            api_base_url,
            identity_path,
        }
    }
}
