pub mod project;
pub mod quiz;
pub mod sqlx_repo;
pub mod step;
pub mod user;
