//! Property tests for the prompt parsers and the retry loop built on them.

use hotel_desk::db::{Database, ResultSet, Statement};
use hotel_desk::error::StatementError;
use hotel_desk::validate::{MAX_NAME_LEN, parse_gender, parse_integer, parse_name, parse_yes_no};
use hotel_desk::{Console, Session};
use proptest::prelude::*;
use std::io::Cursor;

/// Counts statements and returns no rows.
#[derive(Default)]
struct CountingDatabase {
    statements: Vec<Statement>,
}

impl Database for CountingDatabase {
    async fn execute(&mut self, stmt: &Statement) -> Result<u64, StatementError> {
        self.statements.push(stmt.clone());
        Ok(1)
    }

    async fn query(&mut self, stmt: &Statement) -> Result<ResultSet, StatementError> {
        self.statements.push(stmt.clone());
        Ok(ResultSet::default())
    }

    async fn close(&mut self) {}
}

proptest! {
    #[test]
    fn names_of_one_to_thirty_chars_are_accepted(name in "[a-zA-Z .'-]{1,30}") {
        prop_assert_eq!(parse_name(&name), Ok(name.clone()));
    }

    #[test]
    fn names_over_thirty_chars_are_rejected(name in "[a-zA-Z]{31,80}") {
        prop_assert!(parse_name(&name).is_err());
        prop_assert!(name.chars().count() > MAX_NAME_LEN);
    }

    #[test]
    fn alphabetic_input_is_never_an_integer(raw in "[a-zA-Z]{1,12}") {
        prop_assert!(parse_integer(&raw).is_err());
    }

    #[test]
    fn any_i64_parses_back(n in any::<i64>()) {
        prop_assert_eq!(parse_integer(&n.to_string()), Ok(n));
    }

    #[test]
    fn only_yes_and_no_words_are_answers(raw in "[a-z]{3,8}") {
        prop_assume!(raw != "yes");
        prop_assert!(parse_yes_no(&raw).is_err());
    }

    #[test]
    fn gender_outside_the_three_labels_is_rejected(raw in "[A-Za-z ]{0,8}") {
        prop_assume!(!matches!(raw.as_str(), "Male" | "Female" | "Other"));
        prop_assert!(parse_gender(&raw).is_err());
    }

    #[test]
    fn non_numeric_ids_reprompt_without_sql(junk in proptest::collection::vec("[a-z]{1,6}", 0..5)) {
        let mut lines = junk.clone();
        lines.extend(
            ["3", "Jane", "Doe", "1 Elm St", "5550001111", "02/03/91", "Other"]
                .map(String::from),
        );
        let input = lines.join("\n") + "\n";
        let console = Console::new(Cursor::new(input.into_bytes()), Vec::new(), Vec::new());
        let mut session = Session::new(CountingDatabase::default(), console);

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(session.add_customer()).unwrap();

        let out = String::from_utf8(session.console.out.clone()).unwrap();
        prop_assert_eq!(
            out.matches("Enter the customerID of the customer: ").count(),
            junk.len() + 1
        );
        prop_assert_eq!(session.db.statements.len(), 1);
    }
}
