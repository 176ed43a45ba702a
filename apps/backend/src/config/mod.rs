pub mod db;
pub mod scores;
