pub mod config;
pub mod core;
pub mod domain;
pub mod shim;
pub mod store;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::ShimArgs, CliConfig};

pub use config::toml_config::TomlConfig;
pub use core::{
    cart::Cart,
    rut::{format_rut, parse_rut, validate_rut, Rut, RutError},
    session::{AdminSession, CustomerLogin, CustomerSession},
};
pub use store::{FileStore, MemoryStore, RawKey, StoreKey};
pub use utils::error::{KitError, Result};
