use bytes::BytesMut;
use std::error::Error;
use std::fmt;
use tokio_postgres::types::{IsNull, Kind, ToSql, Type, WrongType, to_sql_checked};

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(v) => write!(f, "{}", v),
            SqlValue::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            SqlValue::Bool(true) => f.write_str("TRUE"),
            SqlValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

// The server decides the parameter types from the statement, so the encoding
// is picked per call instead of through `accepts`.
impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            SqlValue::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                Type::INT8 => v.to_sql(ty, out),
                _ => Err(Box::new(WrongType::new::<i64>(ty.clone()))),
            },
            SqlValue::Text(s) => match ty.kind() {
                // enum labels travel as their raw text in binary format
                Kind::Enum(_) => {
                    out.extend_from_slice(s.as_bytes());
                    Ok(IsNull::No)
                }
                _ if <String as ToSql>::accepts(ty) => s.to_sql(ty, out),
                _ => Err(Box::new(WrongType::new::<String>(ty.clone()))),
            },
            SqlValue::Bool(b) => {
                if <bool as ToSql>::accepts(ty) {
                    b.to_sql(ty, out)
                } else {
                    Err(Box::new(WrongType::new::<bool>(ty.clone())))
                }
            }
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// One parameterised SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn params_for_driver(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)?;
        if !self.params.is_empty() {
            let values = self
                .params
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "\n  params: [{}]", values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_keeps_order() {
        let stmt = Statement::new("INSERT INTO Room VALUES ($1, $2, $3)")
            .bind(1)
            .bind(101)
            .bind("Suite");
        assert_eq!(
            stmt.params,
            vec![
                SqlValue::Int(1),
                SqlValue::Int(101),
                SqlValue::Text("Suite".to_string())
            ]
        );
        assert_eq!(stmt.params_for_driver().len(), 3);
    }

    #[test]
    fn test_display_shows_sql_and_values() {
        let stmt = Statement::new("SELECT 1 WHERE $1 AND name = $2")
            .bind(true)
            .bind("O'Brien");
        assert_eq!(
            stmt.to_string(),
            "SELECT 1 WHERE $1 AND name = $2\n  params: [TRUE, 'O''Brien']"
        );
        assert_eq!(Statement::new("SELECT 1").to_string(), "SELECT 1");
    }

    #[test]
    fn test_int_narrows_to_column_width() {
        let mut out = BytesMut::new();
        SqlValue::Int(7).to_sql(&Type::INT4, &mut out).unwrap();
        assert_eq!(&out[..], &7i32.to_be_bytes());

        let mut out = BytesMut::new();
        SqlValue::Int(7).to_sql(&Type::INT8, &mut out).unwrap();
        assert_eq!(&out[..], &7i64.to_be_bytes());

        let mut out = BytesMut::new();
        assert!(
            SqlValue::Int(i64::from(i32::MAX) + 1)
                .to_sql(&Type::INT4, &mut out)
                .is_err()
        );
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let mut out = BytesMut::new();
        assert!(SqlValue::Int(1).to_sql(&Type::TEXT, &mut out).is_err());
        assert!(
            SqlValue::Text("x".into())
                .to_sql(&Type::INT4, &mut out)
                .is_err()
        );
        assert!(SqlValue::Bool(true).to_sql(&Type::INT4, &mut out).is_err());
    }

    #[test]
    fn test_text_and_bool_encoding() {
        let mut out = BytesMut::new();
        SqlValue::Text("Suite".into())
            .to_sql(&Type::VARCHAR, &mut out)
            .unwrap();
        assert_eq!(&out[..], b"Suite");

        let mut out = BytesMut::new();
        SqlValue::Bool(true).to_sql(&Type::BOOL, &mut out).unwrap();
        assert_eq!(&out[..], &[1u8]);
    }
}
