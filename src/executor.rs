use crate::db::{Database, ResultSet, Statement};
use crate::error::{HandlerError, StatementError};
use std::io::Write;

/// Runs an INSERT or other statement whose result is only a row count.
pub async fn execute_update<D: Database>(db: &mut D, stmt: &Statement) -> Result<u64, StatementError> {
    db.execute(stmt).await
}

/// Runs a query, prints the result set and returns the number of rows printed.
pub async fn execute_query<D: Database, W: Write>(
    db: &mut D,
    out: &mut W,
    stmt: &Statement,
) -> Result<usize, HandlerError> {
    let result = db.query(stmt).await?;
    Ok(write_result_set(out, &result)?)
}

/// Tab separated, with a single header line ahead of the first row. An empty
/// result prints nothing at all.
pub fn write_result_set<W: Write>(out: &mut W, result: &ResultSet) -> std::io::Result<usize> {
    for (i, row) in result.rows.iter().enumerate() {
        if i == 0 {
            writeln!(out, "{}", result.columns.join("\t"))?;
        }
        let line = row
            .iter()
            .map(|value| value.as_deref().unwrap_or("NULL"))
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(result.rows.len())
}
