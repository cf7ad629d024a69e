use derive_getters::Getters;
use derive_new::new;

/// Column order shared by the table definition and the insert.
pub const QUOTE_COLUMNS: [&str; 7] = ["open", "high", "low", "close", "volume", "symbol", "date"];

/// Schema-qualified destination of the appended rows.
#[derive(Clone, Debug, Eq, PartialEq, Getters, new)]
pub struct TargetTable {
    schema: String,
    table: String,
}

impl TargetTable {
    pub fn qualified(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.table))
    }
}

/// Double-quotes a Postgres identifier. `open` and `date` are reserved on Redshift.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn column_list() -> String {
    QUOTE_COLUMNS
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ")
}
