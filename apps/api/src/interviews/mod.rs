pub mod handlers;
pub mod repository;
pub mod service;
pub mod validation;
