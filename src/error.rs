use thiserror::Error;

/// Opening the database connection failed. The binary treats this as fatal.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Unable to Connect to Database: {0}")]
    Connect(#[from] tokio_postgres::Error),
}

/// A single statement failed. The menu reports it and keeps running.
#[derive(Error, Debug)]
pub enum StatementError {
    #[error("{0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("the database connection has been closed")]
    Closed,

    #[error("unexpected value returned by the database: {0:?}")]
    UnexpectedValue(Option<String>),
}

/// A field entered at a prompt did not parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: '{0}' is not a whole number")]
    NotANumber(String),

    #[error("Invalid input: expected a number greater than zero, got {0}")]
    NotPositive(i64),

    #[error("Invalid input: a phone number is 1 to 10 digits with no spaces or hyphens")]
    Phone,

    #[error("Invalid input: must be between 1 and {max} characters, got {len}")]
    Length { len: usize, max: usize },

    #[error("Invalid input: a value is required")]
    Empty,

    #[error("Invalid input: answer yes/y or no/n")]
    YesNo,

    #[error("Invalid input: gender must be exactly Male, Female or Other")]
    Gender,
}

/// Everything that can end a single menu operation early.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    Statement(#[from] StatementError),

    #[error(transparent)]
    Input(#[from] ValidationError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream reached end of file; nothing more can be read.
    #[error("input closed")]
    InputClosed,

    #[error("No customer named {first_name} {last_name}")]
    CustomerNotFound {
        first_name: String,
        last_name: String,
    },
}

impl HandlerError {
    /// Whether the menu loop can carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, HandlerError::InputClosed | HandlerError::Io(_))
    }
}
