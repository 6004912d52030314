use crate::db::{Database, Statement};
use crate::error::{HandlerError, StatementError};
use crate::executor::execute_update;
use crate::menu::Session;
use crate::models::{
    NewAssignment, NewBooking, NewCustomer, NewMaintenanceCompany, NewRepair, NewRequest, NewRoom,
};
use crate::queries;
use crate::validate::{
    parse_count, parse_gender, parse_integer, parse_name, parse_phone, parse_required, parse_text,
    parse_yes_no,
};
use std::io::{BufRead, Write};

impl<D: Database, R: BufRead, W: Write, E: Write> Session<D, R, W, E> {
    pub async fn add_customer(&mut self) -> Result<(), HandlerError> {
        self.console.banner("ADD A CUSTOMER")?;

        let c = &mut self.console;
        let customer = NewCustomer {
            customer_id: c.ask("Enter the customerID of the customer: ", parse_integer)?,
            first_name: c.ask("Enter the first name of the customer: ", parse_name)?,
            last_name: c.ask("Enter the last name of the customer: ", parse_name)?,
            address: c.ask("Enter the address of the customer: ", parse_text)?,
            phone: c.ask(
                "Enter the phone number of the customer, at most 10 digits, no spaces or hyphens: ",
                parse_phone,
            )?,
            date_of_birth: c.ask(
                "Enter the date of birth of the customer in the format MM/DD/YY: ",
                parse_required,
            )?,
            gender: c.ask(
                "Enter the customer's gender, either Male, Female, or Other: ",
                parse_gender,
            )?,
        };

        execute_update(&mut self.db, &queries::insert_customer(&customer)).await?;
        tracing::info!(customer_id = customer.customer_id, "customer added");

        let out = &mut self.console.out;
        writeln!(out, "\nSuccessfully added the following customer to the database:")?;
        writeln!(out, "\tCustomer ID: {}", customer.customer_id)?;
        writeln!(out, "\tName: {} {}", customer.first_name, customer.last_name)?;
        writeln!(out, "\tAddress: {}", customer.address)?;
        writeln!(out, "\tPhone Number: {}", customer.phone)?;
        writeln!(out, "\tDate of Birth: {}", customer.date_of_birth)?;
        writeln!(out, "\tGender: {}\n", customer.gender)?;
        Ok(())
    }

    pub async fn add_room(&mut self) -> Result<(), HandlerError> {
        self.console.say("\tADD ROOM")?;

        let c = &mut self.console;
        let room = NewRoom {
            hotel_id: c.ask_once("Enter the hotelID: ", parse_integer)?,
            room_no: c.ask_once("Enter the room number: ", parse_integer)?,
            room_type: c.ask_once("Enter the room type: ", parse_text)?,
        };

        self.run_update(&queries::insert_room(&room)).await
    }

    pub async fn add_maintenance_company(&mut self) -> Result<(), HandlerError> {
        self.console.banner("ADD A MAINTENANCE COMPANY")?;

        let c = &mut self.console;
        let company = NewMaintenanceCompany {
            company_id: c.ask("Enter the companyID: ", parse_integer)?,
            name: c.ask("Enter the company name: ", parse_name)?,
            address: c.ask("Enter the company address: ", parse_text)?,
            certified: c.ask("Is this company certified? (y/n): ", parse_yes_no)?,
        };

        execute_update(&mut self.db, &queries::insert_maintenance_company(&company)).await?;
        tracing::info!(company_id = company.company_id, "maintenance company added");

        let out = &mut self.console.out;
        writeln!(out, "\nSuccessfully added the following company:")?;
        writeln!(out, "\tCompany name: {}", company.name)?;
        writeln!(out, "\tCompany ID: {}", company.company_id)?;
        writeln!(out, "\tAddress: {}", company.address)?;
        writeln!(
            out,
            "\tCERTIFICATION: {}\n",
            if company.certified { "TRUE" } else { "FALSE" }
        )?;
        Ok(())
    }

    pub async fn add_repair(&mut self) -> Result<(), HandlerError> {
        self.console.say("\tADD REPAIR")?;

        let c = &mut self.console;
        let repair = NewRepair {
            repair_id: c.ask_once("Enter the repairID: ", parse_integer)?,
            hotel_id: c.ask_once("Enter the hotelID: ", parse_integer)?,
            room_no: c.ask_once("Enter the room number: ", parse_integer)?,
            company_id: c.ask_once("Enter the maintenance companyID: ", parse_integer)?,
            repair_date: c.ask_once("Enter the repair date in the format MM/DD/YY: ", parse_text)?,
        };

        self.run_update(&queries::insert_repair(&repair)).await
    }

    pub async fn book_room(&mut self) -> Result<(), HandlerError> {
        self.console.banner("BOOK A ROOM")?;

        let c = &mut self.console;
        let hotel_id = c.ask("Enter the hotelID: ", parse_integer)?;
        let room_no = c.ask("Enter the room number: ", parse_integer)?;
        let first_name = c.ask("Enter the first name of the customer: ", parse_name)?;
        let last_name = c.ask("Enter the last name of the customer: ", parse_name)?;
        let booking_date = c.ask(
            "Enter the date of the booking in the format MM/DD/YY: ",
            parse_required,
        )?;
        let party_size = self.ask_party_size()?;
        let price = self
            .console
            .ask("Enter the price of the booking: $", parse_integer)?;

        let found = self
            .db
            .query(&queries::find_customer_id(&first_name, &last_name))
            .await?;
        let customer_id = match found.first_value() {
            Some(id) => parse_returned_id(id)?,
            None => {
                return Err(HandlerError::CustomerNotFound {
                    first_name,
                    last_name,
                });
            }
        };

        let booking = NewBooking {
            customer_id,
            hotel_id,
            room_no,
            booking_date,
            party_size,
            price,
        };
        let inserted = self.db.query(&queries::insert_booking(&booking)).await?;
        let booking_id = match inserted.first_value() {
            Some(id) => parse_returned_id(id)?,
            None => return Err(StatementError::UnexpectedValue(None).into()),
        };
        tracing::info!(booking_id, customer_id, "booking added");

        let out = &mut self.console.out;
        writeln!(out, "\nSuccessfully added the following booking:")?;
        writeln!(out, "\tBooking ID: {}", booking_id)?;
        writeln!(out, "\tName: {} {}", first_name, last_name)?;
        writeln!(out, "\tCustomer ID: {}", booking.customer_id)?;
        writeln!(out, "\tHotel ID: {}", booking.hotel_id)?;
        writeln!(out, "\tRoom Number: {}", booking.room_no)?;
        writeln!(out, "\tDate of Booking: {}", booking.booking_date)?;
        writeln!(out, "\t# people in party: {}", booking.party_size)?;
        writeln!(out, "\tPrice: ${}\n", booking.price)?;
        Ok(())
    }

    /// "no" means a party of one; "yes" asks for the head count. Any
    /// rejected answer starts over at the yes/no question.
    fn ask_party_size(&mut self) -> Result<i64, HandlerError> {
        loop {
            let answer = self
                .console
                .read_line("Is there more than 1 person in the party? (y/n): ")?;
            let attempt = match parse_yes_no(&answer) {
                Ok(false) => Ok(1),
                Ok(true) => {
                    let raw = self.console.read_line("Enter the #people in the party: ")?;
                    parse_count(&raw)
                }
                Err(e) => Err(e),
            };
            match attempt {
                Ok(size) => return Ok(size),
                Err(e) => self.console.report(&e)?,
            }
        }
    }

    pub async fn assign_house_cleaning(&mut self) -> Result<(), HandlerError> {
        self.console.say("\tASSIGN HOUSE CLEANING TO ROOM")?;

        let c = &mut self.console;
        let assignment = NewAssignment {
            staff_id: c.ask_once("Enter the staffID: ", parse_integer)?,
            hotel_id: c.ask_once("Enter the hotelID: ", parse_integer)?,
            room_no: c.ask_once("Enter the room number: ", parse_integer)?,
        };

        self.run_and_count(&queries::insert_assignment(&assignment))
            .await?;
        Ok(())
    }

    pub async fn raise_repair_request(&mut self) -> Result<(), HandlerError> {
        self.console.say("\tREPAIR REQUESTS")?;

        let c = &mut self.console;
        let request = NewRequest {
            manager_id: c.ask_once("Please enter your managerID: ", parse_integer)?,
            repair_id: c.ask_once("Please enter the repairID for the request: ", parse_integer)?,
            request_date: c.ask_once(
                "Please enter the date of the request in the format MM/DD/YY: ",
                parse_text,
            )?,
        };

        self.run_and_count(&queries::insert_request(&request)).await?;
        Ok(())
    }

    /// Echo, execute, print the affected row count.
    async fn run_update(&mut self, stmt: &Statement) -> Result<(), HandlerError> {
        self.echo(stmt)?;
        let affected = execute_update(&mut self.db, stmt).await?;
        self.console.say(&format!("total row(s): {}", affected))?;
        Ok(())
    }
}

fn parse_returned_id(raw: &str) -> Result<i64, StatementError> {
    raw.parse::<i64>()
        .map_err(|_| StatementError::UnexpectedValue(Some(raw.to_string())))
}
