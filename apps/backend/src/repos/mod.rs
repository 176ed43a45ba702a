//! Repository functions for the domain layer.

pub mod events;
pub mod memberships;
pub mod picks;
