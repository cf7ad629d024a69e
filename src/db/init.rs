use sqlx::{Postgres, postgres::PgQueryResult};

use super::utils::{TargetTable, quote_ident};

/// Prices keep up to 18 fractional digits; symbols up to 256 characters.
pub fn create_quotes_table_sql(target: &TargetTable) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            {} NUMERIC(38, 18) NOT NULL,
            {} NUMERIC(38, 18) NOT NULL,
            {} NUMERIC(38, 18) NOT NULL,
            {} NUMERIC(38, 18) NOT NULL,
            {} BIGINT NOT NULL,
            {} VARCHAR(256) NOT NULL,
            {} DATE NOT NULL
        )
        "#,
        target.qualified(),
        quote_ident("open"),
        quote_ident("high"),
        quote_ident("low"),
        quote_ident("close"),
        quote_ident("volume"),
        quote_ident("symbol"),
        quote_ident("date"),
    )
}

pub async fn create_quotes_table(
    target: &TargetTable,
    tx: &mut sqlx::Transaction<'_, Postgres>,
) -> Result<PgQueryResult, sqlx::Error> {
    let sql = create_quotes_table_sql(target);
    sqlx::query(&sql).execute(&mut **tx).await
}
