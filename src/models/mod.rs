pub mod appointment;
pub mod enums;
pub mod filters;
pub mod patient;
pub mod professional;

pub use appointment::*;
pub use filters::*;
pub use patient::*;
pub use professional::*;
