pub mod post;
pub mod project;
pub mod sqlx_repo;
pub mod token;
