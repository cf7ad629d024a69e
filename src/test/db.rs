#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::super::support::ypf_quote;
    use crate::config::AppConfig;
    use crate::db::{
        PostgresWarehouse, TargetTable,
        init::create_quotes_table_sql,
        utils::{column_list, quote_ident},
        write::insert_quote_sql,
    };
    use crate::error::PipelineError;

    fn target() -> TargetTable {
        TargetTable::new(String::from("palombopabloe_coderhouse"), String::from("api"))
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("open"), r#""open""#);
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(target().qualified(), r#""palombopabloe_coderhouse"."api""#);
    }

    #[test]
    fn insert_uses_record_field_names_as_columns() {
        assert_eq!(
            column_list(),
            r#""open", "high", "low", "close", "volume", "symbol", "date""#
        );
        assert_eq!(
            insert_quote_sql(&target()),
            r#"INSERT INTO "palombopabloe_coderhouse"."api" ("open", "high", "low", "close", "volume", "symbol", "date") VALUES ($1, $2, $3, $4, $5, $6, $7)"#
        );
    }

    #[test]
    fn table_definition_is_append_safe() {
        let sql = create_quotes_table_sql(&target());

        assert!(sql.contains(r#"CREATE TABLE IF NOT EXISTS "palombopabloe_coderhouse"."api""#));
        assert!(sql.contains(r#""volume" BIGINT NOT NULL"#));
        for price in ["open", "high", "low", "close"] {
            assert!(sql.contains(&format!(r#""{}" NUMERIC(38, 18) NOT NULL"#, price)));
        }
        assert!(sql.contains(r#""symbol" VARCHAR(256) NOT NULL"#));
        assert!(sql.contains(r#""date" DATE NOT NULL"#));
        assert!(!sql.contains("PRIMARY KEY"));
    }

    #[tokio::test]
    async fn unreachable_warehouse_is_connection_error() {
        let (_, database, ..) = AppConfig::from_ini_str(
            "[api]\nkey = k\n\
             [redshift]\nuser = u\npwd = p\nhost = 127.0.0.1\nport = 9\ndbname = d\nschema = s\n\
             [SMTP]\nserver = s\nport = 587\nusername = u\npassword = p\n\
             [Email]\nsender = a@example.com\nreceiver = b@example.com\n",
            "redshift",
        )
        .unwrap()
        .into_parts();
        let warehouse = PostgresWarehouse::new(database);

        let result = warehouse.load_quote(&ypf_quote()).await;

        assert!(matches!(result, Err(PipelineError::Connection(_))));
    }

    #[tokio::test]
    #[ignore = "needs a Postgres warehouse; set PIPELINE_TEST_CONFIG to an INI file"]
    async fn each_append_adds_exactly_one_row() {
        let path = std::env::var("PIPELINE_TEST_CONFIG").unwrap();
        let (_, database, ..) = AppConfig::load(path, "redshift").unwrap().into_parts();
        let warehouse = PostgresWarehouse::new(database);
        let target = warehouse.target();

        // Creates the table on first use
        warehouse.load_quote(&ypf_quote()).await.unwrap();

        let count_sql = format!("SELECT COUNT(*) AS n FROM {}", target.qualified());
        let connection = warehouse.connect().await.unwrap();
        let before: i64 = sqlx::query(&count_sql)
            .fetch_one(&connection)
            .await
            .unwrap()
            .get("n");

        for _ in 0..3 {
            let rows = warehouse.load_quote(&ypf_quote()).await.unwrap();
            assert_eq!(rows, 1);
        }

        let after: i64 = sqlx::query(&count_sql)
            .fetch_one(&connection)
            .await
            .unwrap()
            .get("n");
        connection.close().await;

        assert_eq!(after - before, 3);
    }
}
