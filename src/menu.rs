use crate::console::Console;
use crate::db::Database;
use crate::error::HandlerError;
use crate::validate::parse_integer;
use std::io::{BufRead, Write};

pub const GREETING: &str = "\n\n*******************************************************\n              User Interface                       \n*******************************************************\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCustomer,
    AddRoom,
    AddMaintenanceCompany,
    AddRepair,
    BookRoom,
    AssignHouseCleaning,
    RaiseRepairRequest,
    AvailableRooms,
    BookedRooms,
    BookingsForWeek,
    TopRoomPrices,
    TopCustomerBookings,
    CustomerTotalCost,
    RepairsByCompany,
    TopMaintenanceCompanies,
    RepairsPerYear,
    Exit,
}

impl MenuChoice {
    /// In menu order; the menu number is the index plus one.
    pub const ALL: [MenuChoice; 17] = [
        MenuChoice::AddCustomer,
        MenuChoice::AddRoom,
        MenuChoice::AddMaintenanceCompany,
        MenuChoice::AddRepair,
        MenuChoice::BookRoom,
        MenuChoice::AssignHouseCleaning,
        MenuChoice::RaiseRepairRequest,
        MenuChoice::AvailableRooms,
        MenuChoice::BookedRooms,
        MenuChoice::BookingsForWeek,
        MenuChoice::TopRoomPrices,
        MenuChoice::TopCustomerBookings,
        MenuChoice::CustomerTotalCost,
        MenuChoice::RepairsByCompany,
        MenuChoice::TopMaintenanceCompanies,
        MenuChoice::RepairsPerYear,
        MenuChoice::Exit,
    ];

    pub fn from_number(number: i64) -> Option<MenuChoice> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddCustomer => "Add new customer",
            MenuChoice::AddRoom => "Add new room",
            MenuChoice::AddMaintenanceCompany => "Add new maintenance company",
            MenuChoice::AddRepair => "Add new repair",
            MenuChoice::BookRoom => "Add new Booking",
            MenuChoice::AssignHouseCleaning => "Assign house cleaning staff to a room",
            MenuChoice::RaiseRepairRequest => "Raise a repair request",
            MenuChoice::AvailableRooms => "Get number of available rooms",
            MenuChoice::BookedRooms => "Get number of booked rooms",
            MenuChoice::BookingsForWeek => "Get hotel bookings for a week",
            MenuChoice::TopRoomPrices => "Get top k rooms with highest price for a date range",
            MenuChoice::TopCustomerBookings => "Get top k highest booking price for a customer",
            MenuChoice::CustomerTotalCost => {
                "Get customer total cost occurred for a given date range"
            }
            MenuChoice::RepairsByCompany => "List the repairs made by maintenance company",
            MenuChoice::TopMaintenanceCompanies => {
                "Get top k maintenance companies based on repair count"
            }
            MenuChoice::RepairsPerYear => {
                "Get number of repairs occurred per year for a given hotel room"
            }
            MenuChoice::Exit => "< EXIT",
        }
    }
}

pub fn render_menu() -> String {
    let mut menu = String::from("MAIN MENU\n---------\n");
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        menu.push_str(&format!("{}. {}\n", i + 1, choice.label()));
    }
    menu
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Stopped,
}

/// One operator session: the connection, the terminal and the menu state.
pub struct Session<D, R, W, E> {
    pub db: D,
    pub console: Console<R, W, E>,
    pub(crate) echo_statements: bool,
    state: MenuState,
    closed: bool,
}

impl<D: Database, R: BufRead, W: Write, E: Write> Session<D, R, W, E> {
    pub fn new(db: D, console: Console<R, W, E>) -> Self {
        Session {
            db,
            console,
            echo_statements: true,
            state: MenuState::Running,
            closed: false,
        }
    }

    /// Whether the unvalidated operations print the statement they issue.
    pub fn with_echo_statements(mut self, echo: bool) -> Self {
        self.echo_statements = echo;
        self
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Reads menu numbers until one parses; the number itself is not checked.
    pub fn read_choice(&mut self) -> Result<i64, HandlerError> {
        loop {
            let raw = self.console.read_line("Please make your choice: ")?;
            match parse_integer(&raw) {
                Ok(number) => return Ok(number),
                Err(_) => self.console.say("Your input is invalid!")?,
            }
        }
    }

    /// Runs the menu until the operator exits or input ends, then closes the
    /// connection.
    pub async fn run(&mut self) -> Result<(), HandlerError> {
        let outcome = self.run_menu().await;
        self.cleanup().await?;
        outcome
    }

    async fn run_menu(&mut self) -> Result<(), HandlerError> {
        while self.state == MenuState::Running {
            self.console.say(&render_menu())?;
            let number = match self.read_choice() {
                Ok(number) => number,
                Err(HandlerError::InputClosed) => {
                    self.state = MenuState::Stopped;
                    break;
                }
                Err(e) => return Err(e),
            };

            match MenuChoice::from_number(number) {
                None => self.console.say("Unrecognized choice!")?,
                Some(MenuChoice::Exit) => self.state = MenuState::Stopped,
                Some(choice) => {
                    tracing::debug!(?choice, "dispatching");
                    if let Err(e) = self.dispatch(choice).await {
                        match e {
                            HandlerError::InputClosed => self.state = MenuState::Stopped,
                            e if e.is_recoverable() => {
                                tracing::debug!(?choice, error = %e, "operation failed");
                                self.console.report(&e)?;
                            }
                            e => return Err(e),
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub async fn dispatch(&mut self, choice: MenuChoice) -> Result<(), HandlerError> {
        match choice {
            MenuChoice::AddCustomer => self.add_customer().await,
            MenuChoice::AddRoom => self.add_room().await,
            MenuChoice::AddMaintenanceCompany => self.add_maintenance_company().await,
            MenuChoice::AddRepair => self.add_repair().await,
            MenuChoice::BookRoom => self.book_room().await,
            MenuChoice::AssignHouseCleaning => self.assign_house_cleaning().await,
            MenuChoice::RaiseRepairRequest => self.raise_repair_request().await,
            MenuChoice::AvailableRooms => self.available_rooms().await,
            MenuChoice::BookedRooms => self.booked_rooms().await,
            MenuChoice::BookingsForWeek => self.bookings_for_week().await,
            MenuChoice::TopRoomPrices => self.top_room_prices().await,
            MenuChoice::TopCustomerBookings => self.top_customer_bookings().await,
            MenuChoice::CustomerTotalCost => self.customer_total_cost().await,
            MenuChoice::RepairsByCompany => self.repairs_by_company().await,
            MenuChoice::TopMaintenanceCompanies => self.top_maintenance_companies().await,
            MenuChoice::RepairsPerYear => self.repairs_per_year().await,
            MenuChoice::Exit => {
                self.state = MenuState::Stopped;
                Ok(())
            }
        }
    }

    async fn cleanup(&mut self) -> Result<(), HandlerError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        write!(self.console.out, "Disconnecting from database...")?;
        self.console.out.flush()?;
        self.db.close().await;
        self.console.say("Done\n\nBye !")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqlValue;
    use crate::test_support::{FakeDatabase, single};
    use std::io::Cursor;

    type TestSession = Session<FakeDatabase, Cursor<Vec<u8>>, Vec<u8>, Vec<u8>>;

    fn session(input: &str) -> TestSession {
        session_from_bytes(input.as_bytes())
    }

    fn session_from_bytes(input: &[u8]) -> TestSession {
        let console = Console::new(Cursor::new(input.to_vec()), Vec::new(), Vec::new());
        Session::new(FakeDatabase::default(), console)
    }

    fn stdout(s: &TestSession) -> String {
        String::from_utf8(s.console.out.clone()).unwrap()
    }

    fn stderr(s: &TestSession) -> String {
        String::from_utf8(s.console.err.clone()).unwrap()
    }

    #[test]
    fn test_from_number_covers_one_to_seventeen() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::AddCustomer));
        assert_eq!(MenuChoice::from_number(16), Some(MenuChoice::RepairsPerYear));
        assert_eq!(MenuChoice::from_number(17), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(18), None);
        assert_eq!(MenuChoice::from_number(-1), None);
    }

    #[test]
    fn test_render_menu_lists_every_choice() {
        let menu = render_menu();
        assert!(menu.starts_with("MAIN MENU"));
        assert!(menu.contains("1. Add new customer\n"));
        assert!(menu.contains("17. < EXIT\n"));
        assert_eq!(menu.lines().count(), 19);
    }

    #[tokio::test]
    async fn test_exit_closes_exactly_once() {
        let mut s = session("17\n");
        s.run().await.unwrap();

        assert_eq!(s.state(), MenuState::Stopped);
        assert_eq!(s.db.close_calls, 1);
        assert_eq!(s.db.issued(), 0);
        assert!(stdout(&s).ends_with("Disconnecting from database...Done\n\nBye !\n"));

        // a second run does not close again
        s.run().await.unwrap();
        assert_eq!(s.db.close_calls, 1);
    }

    #[tokio::test]
    async fn test_invalid_and_unknown_choices_keep_running() {
        let mut s = session("abc\n0\n18\n17\n");
        s.run().await.unwrap();

        let out = stdout(&s);
        assert_eq!(out.matches("Your input is invalid!").count(), 1);
        assert_eq!(out.matches("Unrecognized choice!").count(), 2);
        assert_eq!(out.matches("MAIN MENU").count(), 3);
        assert_eq!(s.db.close_calls, 1);
    }

    #[tokio::test]
    async fn test_undecodable_choice_is_invalid_and_keeps_running() {
        let mut s = session_from_bytes(b"\xff\xfe\n9\n1\n17\n");
        s.db.respond_with(single("booked", "0"));
        s.run().await.unwrap();

        let out = stdout(&s);
        assert_eq!(out.matches("Your input is invalid!").count(), 1);
        assert_eq!(out.matches("MAIN MENU").count(), 2);
        assert_eq!(s.db.queried.len(), 1);
        assert_eq!(s.state(), MenuState::Stopped);
        assert_eq!(s.db.close_calls, 1);
    }

    #[tokio::test]
    async fn test_undecodable_name_is_stored_with_replacement_characters() {
        let mut s = session_from_bytes(
            b"1\n1\nJos\xe9\nDoe\n1 Main St\n5551234567\n01/01/90\nMale\n17\n",
        );
        s.run().await.unwrap();

        assert_eq!(s.db.executed.len(), 1);
        assert_eq!(
            s.db.executed[0].params[1],
            SqlValue::Text("Jos\u{FFFD}".to_string())
        );
        assert!(stdout(&s).contains("Successfully added"));
        assert_eq!(s.db.close_calls, 1);
    }

    #[tokio::test]
    async fn test_end_of_input_stops_and_cleans_up() {
        let mut s = session("");
        s.run().await.unwrap();
        assert_eq!(s.state(), MenuState::Stopped);
        assert_eq!(s.db.close_calls, 1);
    }

    #[tokio::test]
    async fn test_statement_failure_is_reported_and_menu_continues() {
        let mut s = session("9\n4\n9\n4\n17\n");
        s.db.fail_next();
        s.db.respond_with(single("booked", "3"));
        s.run().await.unwrap();

        assert_eq!(s.db.queried.len(), 2);
        assert!(stderr(&s).contains("the database connection has been closed"));
        assert!(stdout(&s).contains("booked\n3\n"));
        assert_eq!(s.db.close_calls, 1);
    }

    #[tokio::test]
    async fn test_bad_number_in_unvalidated_handler_aborts_only_that_handler() {
        // choice 8 reads the hotel ID once; "x" aborts it without any SQL
        let mut s = session("8\nx\n17\n");
        s.run().await.unwrap();

        assert_eq!(s.db.issued(), 0);
        assert!(stderr(&s).contains("Invalid input"));
        assert_eq!(stdout(&s).matches("MAIN MENU").count(), 2);
    }

    #[tokio::test]
    async fn test_input_ending_inside_a_handler_stops_the_menu() {
        let mut s = session("1\n5\n");
        s.run().await.unwrap();
        assert_eq!(s.state(), MenuState::Stopped);
        assert_eq!(s.db.issued(), 0);
        assert_eq!(s.db.close_calls, 1);
    }
}
