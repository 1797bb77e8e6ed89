pub mod cart;
pub mod formatters;
pub mod rut;
pub mod session;

pub use crate::domain::model::{AdminUser, CartItem, OrderStatus, PaymentOutcome, PaymentStatus};
pub use crate::domain::ports::{KeyValueStore, ShimSettings};
pub use crate::utils::error::Result;
