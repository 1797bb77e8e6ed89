//! Typed access to a [`KeyValueStore`], plus the stores the storefront uses.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::domain::model::{AdminUser, CartItem};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Persisted cart lines.
pub const CART: StoreKey<Vec<CartItem>> = StoreKey::new("cart");
/// Admin panel session.
pub const ADMIN_USER: StoreKey<AdminUser> = StoreKey::new("adminUser");
/// Customer bearer token, stored as the bare string.
pub const AUTH_TOKEN: RawKey = RawKey::new("authToken");
/// Customer profile cached next to the auth token.
pub const USER: StoreKey<serde_json::Value> = StoreKey::new("user");

/// A named slot holding one JSON-encoded value of type `T`.
pub struct StoreKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StoreKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn clear<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.remove(self.name)
    }
}

impl<T: Serialize + DeserializeOwned> StoreKey<T> {
    pub fn get<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<Option<T>> {
        match store.get_raw(self.name)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set<S: KeyValueStore + ?Sized>(&self, store: &S, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        store.set_raw(self.name, &raw)
    }
}

/// A named slot holding an unencoded string, like `localStorage.setItem(k, v)`.
#[derive(Debug, Clone, Copy)]
pub struct RawKey {
    name: &'static str,
}

impl RawKey {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<Option<String>> {
        store.get_raw(self.name)
    }

    pub fn set<S: KeyValueStore + ?Sized>(&self, store: &S, value: &str) -> Result<()> {
        store.set_raw(self.name, value)
    }

    pub fn clear<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.remove(self.name)
    }
}

impl<T> Clone for StoreKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StoreKey<T> {}

impl<T> std::fmt::Debug for StoreKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StoreKey").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::KitError;

    #[test]
    fn test_typed_roundtrip_and_clear() {
        let store = MemoryStore::new();
        assert_eq!(USER.get(&store).unwrap(), None);

        let user = serde_json::json!({ "id": 3, "nombre": "Ana" });
        USER.set(&store, &user).unwrap();
        assert_eq!(
            store.get_raw("user").unwrap().as_deref(),
            Some(r#"{"id":3,"nombre":"Ana"}"#)
        );
        assert_eq!(USER.get(&store).unwrap(), Some(user));

        USER.clear(&store).unwrap();
        assert_eq!(USER.get(&store).unwrap(), None);
    }

    #[test]
    fn test_auth_token_is_stored_unquoted() {
        let store = MemoryStore::new();
        assert_eq!(AUTH_TOKEN.get(&store).unwrap(), None);

        AUTH_TOKEN.set(&store, "tok-123").unwrap();
        assert_eq!(store.get_raw("authToken").unwrap().as_deref(), Some("tok-123"));
        assert_eq!(AUTH_TOKEN.get(&store).unwrap().as_deref(), Some("tok-123"));

        // A token saved by the browser reads back unchanged.
        store.set_raw("authToken", "eyJhbGciOi.x.y").unwrap();
        assert_eq!(AUTH_TOKEN.get(&store).unwrap().as_deref(), Some("eyJhbGciOi.x.y"));

        AUTH_TOKEN.clear(&store).unwrap();
        assert_eq!(AUTH_TOKEN.get(&store).unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_surfaces_as_serialization_error() {
        let store = MemoryStore::new();
        store.set_raw("cart", "{not json").unwrap();

        let err = CART.get(&store).unwrap_err();
        assert!(matches!(err, KitError::SerializationError(_)));
    }
}
