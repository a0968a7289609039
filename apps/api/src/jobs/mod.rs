// Job directory: validated postings with interview-round panelists, stored in Postgres.

pub mod handlers;
pub mod panelists;
pub mod repository;
pub mod validation;
