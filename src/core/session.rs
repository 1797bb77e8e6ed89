use crate::domain::model::AdminUser;
use crate::domain::ports::KeyValueStore;
use crate::store;
use crate::utils::error::{KitError, Result};

/// Admin panel session backed by the `adminUser` key.
#[derive(Debug)]
pub struct AdminSession<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> AdminSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn login(&self, user: &AdminUser) -> Result<()> {
        store::ADMIN_USER.set(&self.store, user)?;
        tracing::info!("🔐 Admin session opened for {}", user.username);
        Ok(())
    }

    /// The logged-in admin, if any. A saved record that no longer decodes
    /// counts as logged out.
    pub fn current(&self) -> Result<Option<AdminUser>> {
        match store::ADMIN_USER.get(&self.store) {
            Ok(user) => Ok(user),
            Err(KitError::SerializationError(e)) => {
                tracing::warn!("⚠️ Ignoring unreadable admin session: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.current()?.is_some())
    }

    /// Clears `adminUser` only; a customer logged in on the same browser stays.
    pub fn logout(&self) -> Result<()> {
        store::ADMIN_USER.clear(&self.store)?;
        tracing::info!("🔒 Admin session closed");
        Ok(())
    }
}

/// Restored customer login: the bare token plus the cached profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerLogin {
    pub token: String,
    pub user: serde_json::Value,
}

/// Storefront customer session backed by `authToken` and `user`.
#[derive(Debug)]
pub struct CustomerSession<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CustomerSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn login(&self, token: &str, user: &serde_json::Value) -> Result<()> {
        store::USER.set(&self.store, user)?;
        store::AUTH_TOKEN.set(&self.store, token)?;
        tracing::info!("🔐 Customer session opened");
        Ok(())
    }

    /// Reads the saved login back. Both keys must be present. An unreadable
    /// profile drops both keys and reads as logged out.
    pub fn restore(&self) -> Result<Option<CustomerLogin>> {
        let token = store::AUTH_TOKEN.get(&self.store)?;
        let raw_user = self.store.get_raw(store::USER.name())?;

        let (Some(token), Some(raw_user)) = (token, raw_user) else {
            return Ok(None);
        };
        if token.is_empty() || raw_user.is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&raw_user) {
            Ok(user) => Ok(Some(CustomerLogin { token, user })),
            Err(e) => {
                tracing::warn!("⚠️ Discarding unreadable customer session: {}", e);
                store::AUTH_TOKEN.clear(&self.store)?;
                store::USER.clear(&self.store)?;
                Ok(None)
            }
        }
    }

    /// Clears the token, the profile and the saved cart.
    pub fn logout(&self) -> Result<()> {
        store::AUTH_TOKEN.clear(&self.store)?;
        store::USER.clear(&self.store)?;
        store::CART.clear(&self.store)?;
        tracing::info!("🔒 Customer session closed, cart cleared");
        Ok(())
    }
}
