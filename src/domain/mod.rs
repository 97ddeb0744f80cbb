// src/domain/mod.rs
pub mod core;
pub mod offers;
pub mod ports;
pub mod service;
pub mod users;
pub mod wishes;

pub use self::core::*;
pub use self::offers::*;
pub use self::ports::*;
pub use self::service::*;
pub use self::users::*;
pub use self::wishes::*;
