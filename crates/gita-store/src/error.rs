use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open database at {path}")]
    Connect {
        path: PathBuf,
        source: sqlx::Error,
    },

    #[error("database query failed: {context}")]
    Query {
        context: &'static str,
        source: sqlx::Error,
    },
}

pub(crate) fn query(context: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |source| StoreError::Query { context, source }
}
