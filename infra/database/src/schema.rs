use crate::error::{DatabaseError, DatabaseErrorExt};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// A named, idempotent group of `SurrealQL` definitions.
#[derive(Debug, Clone, Copy)]
pub struct SchemaBlock {
    pub name: &'static str,
    pub script: &'static str,
}

/// Definitions every deployment needs.
pub(crate) const BUILTIN_SCHEMA: &[SchemaBlock] = &[SchemaBlock {
    name: "score",
    script: "
        DEFINE TABLE IF NOT EXISTS score SCHEMAFULL;
        DEFINE FIELD IF NOT EXISTS name ON score TYPE string;
        DEFINE FIELD IF NOT EXISTS difficulty ON score TYPE string
            ASSERT $value IN ['Easy', 'Medium', 'Hard'];
        DEFINE FIELD IF NOT EXISTS score ON score TYPE float;
        DEFINE FIELD IF NOT EXISTS seed ON score TYPE int;
        DEFINE FIELD IF NOT EXISTS timestamp ON score TYPE datetime DEFAULT time::now();
        DEFINE INDEX IF NOT EXISTS score_rank ON score FIELDS difficulty, score;
    ",
}];

/// Applies `blocks` in order, each inside its own transaction.
pub(crate) async fn apply(db: &Surreal<Any>, blocks: &[SchemaBlock]) -> Result<usize, DatabaseError> {
    for block in blocks {
        let query = format!("BEGIN TRANSACTION;\n{}\nCOMMIT TRANSACTION;", block.script);

        db.query(&query)
            .await
            .context(format!("Applying schema block '{}'", block.name))?
            .check()
            .map_err(|e| DatabaseError::Schema {
                message: e.to_string().into(),
                context: Some(block.name.into()),
            })?;
    }
    Ok(blocks.len())
}
