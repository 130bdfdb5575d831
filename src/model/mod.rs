mod data;
mod device;

pub use data::*;
pub use device::*;
