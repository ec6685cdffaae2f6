use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{error, info};

/// On-disk shape: one JSON file holding the identity token, nothing else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IdentityFile {
    user_id: Option<String>,
}

/// File-backed pseudo-identity for this installation. The token links
/// calculations on the remote service without any authentication.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

/// Collision-resistant token: millisecond timestamp plus a random suffix.
pub fn generate_token() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let salt: u64 = rand::random();
    format!("user_{millis}_{salt:012x}")
}

impl IdentityStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn load(&self) -> Option<String> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<IdentityFile>(&bytes) {
                Ok(file) => file.user_id.filter(|id| !id.is_empty()),
                Err(err) => {
                    error!("failed to parse identity file: {err}");
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read identity file: {err}");
                None
            }
        }
    }

    pub async fn save(&self, user_id: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let file = IdentityFile {
            user_id: Some(user_id.to_string()),
        };
        let payload = serde_json::to_vec_pretty(&file)?;
        fs::write(&self.path, payload).await
    }

    pub async fn clear(&self) -> Result<(), std::io::Error> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }

    pub async fn exists(&self) -> bool {
        self.load().await.is_some()
    }

    /// Return the stored token, creating and persisting one first if none
    /// exists. Repeated calls return the same token.
    pub async fn auto_init(&self) -> Result<String, std::io::Error> {
        if let Some(existing) = self.load().await {
            return Ok(existing);
        }
        let token = generate_token();
        self.save(&token).await?;
        info!("created identity {token}");
        Ok(token)
    }

    /// Discard the current token and mint a fresh one. The link to any
    /// previously stored history is lost on purpose; callers must pass an
    /// explicit confirmation before reaching this.
    pub async fn reset(&self) -> Result<String, std::io::Error> {
        self.clear().await?;
        let token = generate_token();
        self.save(&token).await?;
        info!("identity reset, new token {token}");
        Ok(token)
    }

    /// Clear the token, then re-initialise after a short pause so callers
    /// always end up with a valid identity.
    pub async fn logout(&self) -> Result<String, std::io::Error> {
        self.clear().await?;
        tokio::time::sleep(Duration::from_millis(200)).await;
        self.auto_init().await
    }
}
