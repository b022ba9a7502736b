//! Identity domain layer: entities, issuance service, validation

pub mod entities;
pub mod service;
pub mod validation;
