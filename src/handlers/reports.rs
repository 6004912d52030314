use crate::db::Database;
use crate::error::HandlerError;
use crate::menu::Session;
use crate::models::DateRange;
use crate::queries;
use crate::validate::{parse_count, parse_integer, parse_name, parse_required, parse_text};
use std::io::{BufRead, Write};

impl<D: Database, R: BufRead, W: Write, E: Write> Session<D, R, W, E> {
    pub async fn available_rooms(&mut self) -> Result<(), HandlerError> {
        self.console.say("\tGET NUMBER OF AVAILABLE ROOMS")?;
        let hotel_id = self.console.ask_once("Enter the hotelID: ", parse_integer)?;

        self.run_and_count(&queries::available_rooms(hotel_id)).await?;
        Ok(())
    }

    pub async fn booked_rooms(&mut self) -> Result<(), HandlerError> {
        self.console.banner("LIST NUMBER OF BOOKED ROOMS")?;
        let hotel_id = self.console.ask("Enter the hotelID: ", parse_integer)?;

        self.run_report(&queries::booked_rooms(hotel_id)).await?;
        Ok(())
    }

    pub async fn bookings_for_week(&mut self) -> Result<(), HandlerError> {
        self.console.say("\tLIST HOTEL ROOM BOOKINGS FOR A WEEK")?;
        let start = self.console.ask_once("Enter the booking date: ", parse_text)?;
        let hotel_id = self.console.ask_once("Enter the hotelID: ", parse_integer)?;

        self.run_and_count(&queries::bookings_for_week(hotel_id, &start))
            .await?;
        Ok(())
    }

    pub async fn top_room_prices(&mut self) -> Result<(), HandlerError> {
        self.console
            .banner("LIST TOP HIGHEST ROOM PRICE FOR A DATE RANGE")?;
        let range = self.ask_date_range()?;
        let k = self
            .console
            .ask("Enter how many rooms you want to see: ", parse_count)?;

        self.run_report(&queries::top_room_prices(&range, k)).await?;
        Ok(())
    }

    pub async fn top_customer_bookings(&mut self) -> Result<(), HandlerError> {
        self.console
            .say("\tTOP K HIGHEST PRICE BOOKINGS FOR A CUSTOMER")?;
        let c = &mut self.console;
        let first_name = c.ask_once("Enter the customer's first name: ", parse_text)?;
        let last_name = c.ask_once("Enter the customer's last name: ", parse_text)?;
        let k = c.ask_once("How many entries would you like to see?: ", parse_count)?;

        self.run_and_count(&queries::top_customer_bookings(&first_name, &last_name, k))
            .await?;
        Ok(())
    }

    pub async fn customer_total_cost(&mut self) -> Result<(), HandlerError> {
        self.console.banner("GET TOTAL COST FOR A CUSTOMER")?;
        let c = &mut self.console;
        let hotel_id = c.ask("Enter the hotelID: ", parse_integer)?;
        let first_name = c.ask("Enter the first name of the customer: ", parse_name)?;
        let last_name = c.ask("Enter the last name of the customer: ", parse_name)?;
        let range = self.ask_date_range()?;

        self.run_report(&queries::customer_total_cost(
            hotel_id,
            &first_name,
            &last_name,
            &range,
        ))
        .await?;
        Ok(())
    }

    pub async fn repairs_by_company(&mut self) -> Result<(), HandlerError> {
        self.console.say("\tLIST REPAIRS MADE")?;
        let name = self
            .console
            .ask_once("Enter the Maintenance company name: ", parse_text)?;

        self.run_and_count(&queries::repairs_by_company(&name)).await?;
        Ok(())
    }

    pub async fn top_maintenance_companies(&mut self) -> Result<(), HandlerError> {
        self.console.say("\tLIST TOP K MAINTENANCE COMPANIES")?;
        let k = self
            .console
            .ask_once("How many top companies do you want to see?: ", parse_count)?;

        self.run_and_count(&queries::top_maintenance_companies(k))
            .await?;
        Ok(())
    }

    pub async fn repairs_per_year(&mut self) -> Result<(), HandlerError> {
        self.console
            .say("\tLIST NUMBER OF REPAIRS FOR EACH ROOM PER YEAR")?;
        let c = &mut self.console;
        let hotel_id = c.ask_once("Enter the hotelID: ", parse_integer)?;
        let room_no = c.ask_once("Enter the room number: ", parse_integer)?;

        self.run_and_count(&queries::repairs_per_year(hotel_id, room_no))
            .await?;
        Ok(())
    }

    fn ask_date_range(&mut self) -> Result<DateRange, HandlerError> {
        let from = self.console.ask(
            "Enter the first date range in the format MM/DD/YY: ",
            parse_required,
        )?;
        let to = self.console.ask(
            "Enter the second date range in the format MM/DD/YY: ",
            parse_required,
        )?;
        Ok(DateRange { from, to })
    }
}
