pub mod projection_builder;
pub mod repository;
