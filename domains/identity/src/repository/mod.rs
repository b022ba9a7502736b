//! User directory for the Identity domain

pub mod users;

pub use users::{PgUserDirectory, UserDirectory};
