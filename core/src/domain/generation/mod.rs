pub mod errors;
pub mod ports;
pub mod retry;
#[cfg(test)]
pub(crate) mod testing;
pub mod validation;
pub mod value_objects;

pub use errors::*;
pub use ports::*;
pub use value_objects::*;
