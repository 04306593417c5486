use anyhow::Context;
use serde::{Deserialize, Serialize};

use std::path::Path;

use discount::DiscountConfig;
use pricing_client::{AuthToken, PricingClientConfig};

use super::tracing::TracingConfig;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub pricing_client: PricingClientConfig,
    #[serde(default)]
    pub discount: DiscountConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

pub struct EnvOverride {
    pub auth_token: Option<String>,
}

impl Config {
    /// A missing file yields the defaults, an unreadable or malformed one is an error.
    pub fn from_path(
        path: impl AsRef<Path>,
        EnvOverride { auth_token }: EnvOverride,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config: Config = if path.exists() {
            let config_file =
                std::fs::read_to_string(path).context("Couldn't read config file")?;
            serde_yaml::from_str(&config_file).context("Couldn't parse config file")?
        } else {
            Config::default()
        };

        if let Some(token) = auth_token.filter(|token| !token.is_empty()) {
            config.pricing_client.auth_token = Some(AuthToken::from(token));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    use super::*;

    fn no_override() -> EnvOverride {
        EnvOverride { auth_token: None }
    }

    #[test]
    fn missing_file_yields_defaults() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = Config::from_path(dir.path().join("kassa.yml"), no_override())?;
        assert_eq!(config.discount.threshold, dec!(500000));
        assert_eq!(config.pricing_client.path, "/api/exchange/calculate");
        assert!(config.pricing_client.auth_token.is_none());
        assert!(!config.tracing.json);
        Ok(())
    }

    #[test]
    fn partial_file_and_env_override() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("kassa.yml");
        std::fs::write(
            &path,
            "pricing_client:\n  url: http://pricing.internal:9000\n  auth_token: from-file\ndiscount:\n  fallback_percent: 3\n",
        )?;

        let config = Config::from_path(
            &path,
            EnvOverride {
                auth_token: Some("from-env".to_string()),
            },
        )?;

        assert_eq!(config.pricing_client.url.as_str(), "http://pricing.internal:9000/");
        assert_eq!(
            config.pricing_client.auth_token,
            Some(AuthToken::from("from-env"))
        );
        assert_eq!(config.discount.fallback_percent, dec!(3));
        assert_eq!(config.discount.threshold, dec!(500000));
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("kassa.yml");
        std::fs::write(&path, "discount: [not, a, map]\n")?;
        assert!(Config::from_path(&path, no_override()).is_err());
        Ok(())
    }
}
