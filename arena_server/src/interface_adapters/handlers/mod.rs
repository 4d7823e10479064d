pub mod games;
pub mod lobby;
