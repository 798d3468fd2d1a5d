//! Types as they are stored in the database.

pub mod category;
pub mod question;

#[cfg(test)]
pub use examples::seed;
