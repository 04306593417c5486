use serde::{Deserialize, Serialize};
use shared::string_wrapper;
use url::Url;

use std::time::Duration;

string_wrapper! { AuthToken }

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthToken(<redacted>)")
    }
}

#[serde_with::serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PricingClientConfig {
    #[serde(default = "default_url")]
    pub url: Url,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    #[serde(default)]
    pub auth_token: Option<AuthToken>,
}

impl Default for PricingClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            path: default_path(),
            timeout: default_timeout(),
            auth_token: None,
        }
    }
}

fn default_url() -> Url {
    Url::parse("http://localhost:8080").expect("invalid default pricing url")
}

fn default_path() -> String {
    "/api/exchange/calculate".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}
