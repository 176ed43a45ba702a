//! Infrastructure layer: database bootstrap and state assembly.

pub mod db;
pub mod state;
