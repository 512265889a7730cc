pub mod appointment;
pub mod drug;
pub mod enums;
pub mod user;

pub use appointment::*;
pub use drug::*;
pub use enums::*;
pub use user::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
