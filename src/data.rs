pub mod database;
pub mod local_store;
pub mod models;
pub mod repos;
