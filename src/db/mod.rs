mod statement;

pub use statement::{SqlValue, Statement};

use crate::error::{ConnectionError, StatementError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls, Row};

/// Rows returned by a query, every value already rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        ResultSet { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First column of the first row, if there is one and it is not NULL.
    pub fn first_value(&self) -> Option<&str> {
        self.rows
            .first()
            .and_then(|row| row.first())
            .and_then(|value| value.as_deref())
    }

    fn from_rows(rows: Vec<Row>) -> Result<ResultSet, StatementError> {
        let columns = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            let mut values = Vec::with_capacity(row.len());
            for i in 0..row.len() {
                let value: Option<String> = row.try_get(i)?;
                values.push(value);
            }
            data.push(values);
        }

        Ok(ResultSet::new(columns, data))
    }
}

/// The operations the menu needs from the store.
#[allow(async_fn_in_trait)]
pub trait Database {
    /// Runs a statement that returns no rows and reports the affected row count.
    async fn execute(&mut self, stmt: &Statement) -> Result<u64, StatementError>;

    async fn query(&mut self, stmt: &Statement) -> Result<ResultSet, StatementError>;

    /// Releases the connection. Safe to call more than once; never fails.
    async fn close(&mut self);
}

#[derive(Debug)]
pub struct DatabaseConnection {
    client: Option<Client>,
    driver: Option<JoinHandle<()>>,
}

impl DatabaseConnection {
    pub async fn connect(
        host: &str,
        port: u16,
        database: &str,
        username: &str,
        password: &str,
        connect_timeout: Duration,
    ) -> Result<DatabaseConnection, ConnectionError> {
        let mut config = Config::new();
        config
            .host(host)
            .port(port)
            .dbname(database)
            .user(username)
            .password(password)
            .connect_timeout(connect_timeout);

        Self::connect_with(config).await
    }

    pub async fn connect_with(config: Config) -> Result<DatabaseConnection, ConnectionError> {
        let (client, connection) = config.connect(NoTls).await?;

        // The connection object performs the actual communication with the database,
        // so spawn it off to run on its own.
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "database connection error");
            }
        });

        tracing::info!("connected to database");
        Ok(DatabaseConnection {
            client: Some(client),
            driver: Some(driver),
        })
    }

    fn client(&self) -> Result<&Client, StatementError> {
        self.client.as_ref().ok_or(StatementError::Closed)
    }
}

impl Database for DatabaseConnection {
    async fn execute(&mut self, stmt: &Statement) -> Result<u64, StatementError> {
        tracing::debug!(sql = %stmt.sql, params = stmt.params.len(), "execute");
        let affected = self
            .client()?
            .execute(stmt.sql.as_str(), &stmt.params_for_driver())
            .await?;
        Ok(affected)
    }

    async fn query(&mut self, stmt: &Statement) -> Result<ResultSet, StatementError> {
        tracing::debug!(sql = %stmt.sql, params = stmt.params.len(), "query");
        let rows = self
            .client()?
            .query(stmt.sql.as_str(), &stmt.params_for_driver())
            .await?;
        ResultSet::from_rows(rows)
    }

    async fn close(&mut self) {
        // Dropping the client ends the session; the driver task then finishes.
        if self.client.take().is_none() {
            return;
        }
        if let Some(driver) = self.driver.take() {
            if let Err(e) = driver.await {
                tracing::warn!(error = %e, "ignoring error while closing the connection");
            }
        }
        tracing::info!("disconnected from database");
    }
}
