pub mod commits;
pub mod error;
pub mod health;
pub mod repositories;
pub mod top;

pub use error::AppError;
