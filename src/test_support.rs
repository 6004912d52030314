//! In-memory stand-in for the PostgreSQL connection.
//!
//! Records every statement it receives and answers queries from a queue of
//! canned result sets, so handlers can be driven without a server.

use crate::db::{Database, ResultSet, Statement};
use crate::error::StatementError;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct FakeDatabase {
    pub executed: Vec<Statement>,
    pub queried: Vec<Statement>,
    pub close_calls: usize,
    responses: VecDeque<ResultSet>,
    failures: usize,
}

impl FakeDatabase {
    /// Queues the result of the next `query` call.
    pub fn respond_with(&mut self, result: ResultSet) {
        self.responses.push_back(result);
    }

    /// Makes the next statement of either kind fail.
    pub fn fail_next(&mut self) {
        self.failures += 1;
    }

    /// Every statement issued, executes and queries together.
    pub fn issued(&self) -> usize {
        self.executed.len() + self.queried.len()
    }

    fn take_failure(&mut self) -> Result<(), StatementError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(StatementError::Closed);
        }
        Ok(())
    }
}

impl Database for FakeDatabase {
    async fn execute(&mut self, stmt: &Statement) -> Result<u64, StatementError> {
        self.executed.push(stmt.clone());
        self.take_failure()?;
        Ok(1)
    }

    async fn query(&mut self, stmt: &Statement) -> Result<ResultSet, StatementError> {
        self.queried.push(stmt.clone());
        self.take_failure()?;
        Ok(self.responses.pop_front().unwrap_or_default())
    }

    async fn close(&mut self) {
        self.close_calls += 1;
    }
}

/// A one-column, one-row result.
pub fn single(column: &str, value: &str) -> ResultSet {
    ResultSet::new(
        vec![column.to_string()],
        vec![vec![Some(value.to_string())]],
    )
}
