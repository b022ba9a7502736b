//! Identity domain: user directory, token issuance, credential and role changes

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::entities::*;
pub use domain::service::{IdentityError, IdentityService};
pub use domain::validation::validate_password_strength;
pub use repository::{PgUserDirectory, UserDirectory};

pub use api::routes;
pub use api::IdentityState;
