pub mod audit;
pub mod defaults;
pub mod error;
pub mod local_client;
pub mod model;
pub mod repos;
pub mod service;
