//! Configuration management for the ante handler

use plasma_core::{SignatureCodec, SECP256K1_SIGNATURE_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main ante handler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnteConfig {
    /// Signature encoding configuration
    pub signature: SignatureConfig,
}

/// Signature encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureConfig {
    /// Hex-encoded 4-byte type prefix in front of every signature
    pub type_prefix: String,
}

impl Default for AnteConfig {
    fn default() -> Self {
        Self {
            signature: SignatureConfig {
                type_prefix: hex::encode(SECP256K1_SIGNATURE_PREFIX),
            },
        }
    }
}

impl AnteConfig {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("signature.type_prefix", hex::encode(SECP256K1_SIGNATURE_PREFIX))?
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            // Default configuration
            .set_default("signature.type_prefix", hex::encode(SECP256K1_SIGNATURE_PREFIX))?
            // Configuration file
            .add_source(config::File::with_name("config/plasma").required(false))
            // Environment variables, e.g. PLASMA_SIGNATURE__TYPE_PREFIX
            .add_source(
                config::Environment::with_prefix("PLASMA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Decode the configured signature type prefix
    pub fn signature_prefix(&self) -> Result<[u8; 4], config::ConfigError> {
        let digits = self.signature.type_prefix.trim_start_matches("0x");
        let bytes = hex::decode(digits).map_err(|e| {
            config::ConfigError::Message(format!("signature.type_prefix is not hex: {}", e))
        })?;

        bytes.as_slice().try_into().map_err(|_| {
            config::ConfigError::Message(format!(
                "signature.type_prefix must be 4 bytes, got {}",
                bytes.len()
            ))
        })
    }

    /// Build the signature codec described by this configuration
    pub fn codec(&self) -> Result<SignatureCodec, config::ConfigError> {
        Ok(SignatureCodec::new(self.signature_prefix()?))
    }
}
