//! The sixteen menu operations, implemented as methods on [`Session`].
//!
//! Validated operations re-prompt a field until it parses. The others read
//! each field once, echo the statement they issue and print the row count.

mod inserts;
mod reports;

use crate::db::{Database, Statement};
use crate::error::HandlerError;
use crate::executor::execute_query;
use crate::menu::Session;
use std::io::{BufRead, Write};

impl<D: Database, R: BufRead, W: Write, E: Write> Session<D, R, W, E> {
    fn echo(&mut self, stmt: &Statement) -> Result<(), HandlerError> {
        if self.echo_statements {
            self.console.say(&stmt.to_string())?;
        }
        Ok(())
    }

    /// Echo, run, print the rows and the row count.
    async fn run_and_count(&mut self, stmt: &Statement) -> Result<usize, HandlerError> {
        self.echo(stmt)?;
        let count = execute_query(&mut self.db, &mut self.console.out, stmt).await?;
        self.console.say(&format!("total row(s): {}", count))?;
        Ok(count)
    }

    /// The framed result block the validated reports print.
    async fn run_report(&mut self, stmt: &Statement) -> Result<usize, HandlerError> {
        write!(self.console.out, "\n\tRESULTS\n-----------------------\n")?;
        let count = execute_query(&mut self.db, &mut self.console.out, stmt).await?;
        write!(self.console.out, "\n\n")?;
        Ok(count)
    }
}
