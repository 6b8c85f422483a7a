use sqlx::{PgPool, Row};

use fixtura_core::{Error, Result};

pub struct RawColumn {
    pub name: String,
    pub data_type: String,
    pub udt_name: String,
}

pub async fn list_columns(pool: &PgPool, schema: &str, table: &str) -> Result<Vec<RawColumn>> {
    let rows = sqlx::query(
        r#"
        select
          column_name::text as name,
          data_type::text as data_type,
          udt_name::text as udt_name
        from information_schema.columns
        where table_schema = $1
          and table_name = $2
        order by ordinal_position
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))?;

    rows.into_iter()
        .map(|row| {
            Ok(RawColumn {
                name: row.try_get("name").map_err(|err| Error::Db(err.to_string()))?,
                data_type: row
                    .try_get("data_type")
                    .map_err(|err| Error::Db(err.to_string()))?,
                udt_name: row
                    .try_get("udt_name")
                    .map_err(|err| Error::Db(err.to_string()))?,
            })
        })
        .collect()
}
