use sqlx::{PgPool, Postgres};

use super::{
    init::create_quotes_table,
    utils::{QUOTE_COLUMNS, TargetTable, column_list},
};
use crate::models::QuoteRecord;

pub fn insert_quote_sql(target: &TargetTable) -> String {
    let placeholders = (1..=QUOTE_COLUMNS.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        target.qualified(),
        column_list(),
        placeholders
    )
}

pub async fn insert_quote(
    quote: &QuoteRecord,
    target: &TargetTable,
    tx: &mut sqlx::Transaction<'_, Postgres>,
) -> Result<u64, sqlx::Error> {
    let sql = insert_quote_sql(target);
    let rows = sqlx::query(&sql)
        .bind(*quote.open())
        .bind(*quote.high())
        .bind(*quote.low())
        .bind(*quote.close())
        .bind(*quote.volume())
        .bind(quote.symbol().as_str())
        .bind(*quote.date())
        .execute(&mut **tx)
        .await?
        .rows_affected();

    Ok(rows)
}

/// Creates the table if needed and appends `quote`, all in one transaction.
/// Dropping the transaction on error rolls it back.
pub async fn append_quote(
    quote: &QuoteRecord,
    target: &TargetTable,
    connection: &PgPool,
) -> Result<u64, sqlx::Error> {
    let mut tx = connection.begin().await?;

    create_quotes_table(target, &mut tx).await?;
    let rows = insert_quote(quote, target, &mut tx).await?;

    tx.commit().await?;

    Ok(rows)
}
