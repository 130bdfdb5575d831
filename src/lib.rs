mod binary_sensor;
mod config;
mod constants;
mod cover;
mod device_manager;
mod device_store;
mod entity;
mod model;
mod platform;
mod resolver;
mod sensor;
mod switch;
mod value;

pub use binary_sensor::*;
pub use config::*;
pub use constants::*;
pub use cover::*;
pub use device_manager::*;
pub use device_store::*;
pub use entity::*;
pub use model::*;
pub use platform::*;
pub use resolver::*;
pub use sensor::*;
pub use switch::*;
pub use value::*;
