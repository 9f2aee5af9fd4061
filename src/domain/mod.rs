pub mod errors;
pub mod late_fee;
pub mod notifications;
pub mod value_objects;

pub use errors::*;
pub use late_fee::*;
pub use value_objects::*;
