use anyhow::{Context, Result};
use fixtura_catalog::{SchemaCatalog, PostgresCatalog};
use fixtura_core::{ColumnDescriptor, Error};
use sqlx::postgres::PgPoolOptions;
use std::env;

const FIXTURE_SQL: &[&str] = &[
    "drop table if exists fixtura_catalog_posts",
    "create table fixtura_catalog_posts (
        id bigserial primary key,
        title varchar(120) not null,
        author_id integer not null,
        published_at timestamptz
    )",
];

fn database_url() -> Option<String> {
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .ok()
}

fn reset_fixtures(db_url: &str) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;
    runtime.block_on(async {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(db_url)
            .await
            .context("connecting to Postgres")?;
        for statement in FIXTURE_SQL {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .with_context(|| format!("executing fixture {statement}"))?;
        }
        Ok(())
    })
}

#[test]
fn reads_columns_from_information_schema() -> Result<()> {
    let Some(db_url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL or DATABASE_URL for integration tests");
        return Ok(());
    };
    reset_fixtures(&db_url)?;

    let catalog = PostgresCatalog::connect(&db_url)?;
    let columns = catalog.columns("fixtura_catalog_posts")?;
    assert_eq!(
        columns,
        vec![
            ColumnDescriptor::new("id", "bigint"),
            ColumnDescriptor::new("title", "string"),
            ColumnDescriptor::new("author_id", "integer"),
            ColumnDescriptor::new("published_at", "datetime"),
        ]
    );

    let missing = catalog.columns("fixtura_catalog_missing");
    assert!(matches!(missing, Err(Error::UnknownTable(_))));
    Ok(())
}
