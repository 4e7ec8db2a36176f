//! Trade mutations through the API are disabled.
//!
//! Users propose, accept, reject and cancel trades on Yahoo's own pages; Huddle observes
//! the outcome by polling (see `service::verification`). These stubs exist so callers get a
//! typed error instead of reaching for an endpoint.

use crate::server::{error::provider::ProviderError, provider::ProviderClient};

impl ProviderClient {
    pub async fn propose_trade(&self, _access_token: &str, _league_key: &str) -> Result<(), ProviderError> {
        Err(ProviderError::WriteDisabled("propose trade"))
    }

    pub async fn accept_trade(&self, _access_token: &str, _transaction_key: &str) -> Result<(), ProviderError> {
        Err(ProviderError::WriteDisabled("accept trade"))
    }

    pub async fn reject_trade(&self, _access_token: &str, _transaction_key: &str) -> Result<(), ProviderError> {
        Err(ProviderError::WriteDisabled("reject trade"))
    }

    pub async fn cancel_trade(&self, _access_token: &str, _transaction_key: &str) -> Result<(), ProviderError> {
        Err(ProviderError::WriteDisabled("cancel trade"))
    }
}

#[cfg(test)]
mod tests {
    use crate::server::{error::provider::ProviderError, provider::ProviderClient};

    #[tokio::test]
    async fn all_writes_fail() {
        let client = ProviderClient::new(reqwest::Client::new(), "http://127.0.0.1:9");

        assert!(matches!(
            client.propose_trade("t", "466.l.1").await,
            Err(ProviderError::WriteDisabled(_))
        ));
        assert!(matches!(
            client.accept_trade("t", "466.l.1.pt.1").await,
            Err(ProviderError::WriteDisabled(_))
        ));
        assert!(matches!(
            client.reject_trade("t", "466.l.1.pt.1").await,
            Err(ProviderError::WriteDisabled(_))
        ));
        assert!(matches!(
            client.cancel_trade("t", "466.l.1.pt.1").await,
            Err(ProviderError::WriteDisabled(_))
        ));
    }
}
