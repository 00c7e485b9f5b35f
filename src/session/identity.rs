//! Operator identity held in the session

use super::store::KeyValueStore;
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

const OPERATOR_ID_KEY: &str = "operator-id";
const ACCESS_TOKEN_KEY: &str = "access-token";

/// Read/write access to the logged-in operator
#[derive(Clone)]
pub struct Identity {
    store: Arc<dyn KeyValueStore>,
}

impl Identity {
    /// Create an identity view over the given session store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Operator id of the logged-in operator
    pub async fn operator_id(&self) -> Result<String> {
        self.store
            .get(OPERATOR_ID_KEY)
            .await
            .filter(|id| !id.is_empty())
            .ok_or(Error::NotLoggedIn)
    }

    /// Access token of the logged-in operator, if any
    pub async fn access_token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .await
            .filter(|token| !token.is_empty())
    }

    /// Whether an operator is logged in
    pub async fn is_logged_in(&self) -> bool {
        self.operator_id().await.is_ok()
    }

    /// Record a successful login
    pub async fn login(&self, operator_id: &str, access_token: &str) -> Result<()> {
        self.store
            .set(ACCESS_TOKEN_KEY, access_token.to_string())
            .await?;
        self.store
            .set(OPERATOR_ID_KEY, operator_id.to_string())
            .await?;
        info!(operator_id, "Logged in");
        Ok(())
    }

    /// Forget the operator and every other value in the session
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        info!("Logged out, session cleared");
        Ok(())
    }
}
