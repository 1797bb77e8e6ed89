use crate::utils::error::Result;
use std::time::Duration;

/// String key-value persistence, shaped like the browser's `localStorage`.
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_raw(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Everything the redirect shim needs to know, regardless of where it was configured.
pub trait ShimSettings: Send + Sync {
    fn listen_host(&self) -> &str;
    fn listen_port(&self) -> u16;
    /// Origin of the running application, e.g. `http://localhost:5174` (no trailing slash).
    fn target_origin(&self) -> String;
    fn callback_path(&self) -> &str;
    fn redirect_delay(&self) -> Duration;
}
