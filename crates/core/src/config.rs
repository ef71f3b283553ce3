//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    /// SQLite database.
    Sqlite {
        /// Database file path.
        path: PathBuf,
    },
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/cofre.db"),
        }
    }
}

/// Retention policy for soft-deleted records.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Days a soft-deleted record remains restorable before purge eligibility.
    #[serde(default = "default_retention_days")]
    pub days: u32,
    /// Whether the background retention sweep runs.
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,
    /// Interval between automatic sweep runs, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Maximum rows purged per table per sweep run.
    #[serde(default = "default_sweep_batch_limit")]
    pub sweep_batch_limit: u32,
}

fn default_retention_days() -> u32 {
    crate::DEFAULT_RETENTION_DAYS
}

fn default_sweep_enabled() -> bool {
    true
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

fn default_sweep_batch_limit() -> u32 {
    500
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            days: default_retention_days(),
            sweep_enabled: default_sweep_enabled(),
            sweep_interval_secs: default_sweep_interval_secs(),
            sweep_batch_limit: default_sweep_batch_limit(),
        }
    }
}

impl RetentionConfig {
    /// The retention window as a Duration.
    pub fn window(&self) -> Duration {
        Duration::days(i64::from(self.days))
    }

    /// Validate retention configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.days == 0 {
            return Err("retention.days must be at least 1".to_string());
        }
        if self.sweep_enabled && self.sweep_interval_secs == 0 {
            return Err("retention.sweep_interval_secs must be nonzero when the sweep is enabled"
                .to_string());
        }
        if self.sweep_batch_limit == 0 {
            return Err("retention.sweep_batch_limit must be nonzero".to_string());
        }
        Ok(())
    }
}

/// One configured actor credential.
///
/// The raw token never appears in configuration; only its SHA256 hex digest
/// does. Generate with: `echo -n "your-secret-token" | sha256sum`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActorToken {
    /// Actor id the token authenticates as.
    pub actor_id: i64,
    /// Pre-computed hash of the token (SHA256 hex, 64 characters).
    pub token_hash: String,
    /// Free-form description (e.g. a family member's name).
    pub description: Option<String>,
}

/// Authentication configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Configured actor credentials.
    #[serde(default)]
    pub tokens: Vec<ActorToken>,
}

impl AuthConfig {
    /// Create a test configuration with deterministic tokens.
    ///
    /// **For testing only.** The hashes correspond to the literal tokens
    /// named in the descriptions.
    pub fn for_testing() -> Self {
        Self {
            tokens: vec![
                ActorToken {
                    actor_id: 1,
                    // SHA256 of "test-family-token"
                    token_hash: "3cfd725b8612987417ca09f4f2bcc7d19d174fa8bb1ef8b70942adbd1c11c992"
                        .to_string(),
                    description: Some("test-family-token".to_string()),
                },
                ActorToken {
                    actor_id: 2,
                    // SHA256 of "second-actor-token"
                    token_hash: "24fda5ad5a73dd834f2d1b5f5f133ef223d1fe6fbf361bc05e933a8d72ecb2f9"
                        .to_string(),
                    description: Some("second-actor-token".to_string()),
                },
            ],
        }
    }

    /// Validate authentication configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        for token in &self.tokens {
            if token.token_hash.len() != 64
                || !token.token_hash.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(format!(
                    "auth token for actor {} must be a 64-character SHA256 hex digest",
                    token.actor_id
                ));
            }
        }
        Ok(())
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Create a test configuration with deterministic defaults.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            metadata: MetadataConfig::Sqlite {
                path: PathBuf::from(":memory:"),
            },
            retention: RetentionConfig::default(),
            auth: AuthConfig::for_testing(),
        }
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.retention.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}
