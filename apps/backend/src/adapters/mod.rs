//! SeaORM adapters. Functions return `DbErr`; the repos layer maps to `DomainError`.

pub mod competition_users_sea;
pub mod events_sea;
pub mod picks_sea;
