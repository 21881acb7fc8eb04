use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxPostRepo {
    pub(crate) pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub(crate) pool: PgPool,
}
