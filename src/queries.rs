//! SQL for every menu operation.
//!
//! Values are always bound as parameters. Dates travel as the text the
//! operator typed and are cast server-side, so the session's `DateStyle`
//! decides how `MM/DD/YY` is read. Report columns are cast to `text` so the
//! printer never has to know their types.

use crate::db::Statement;
use crate::models::{
    DateRange, NewAssignment, NewBooking, NewCustomer, NewMaintenanceCompany, NewRepair,
    NewRequest, NewRoom,
};

pub fn insert_customer(c: &NewCustomer) -> Statement {
    Statement::new(
        "INSERT INTO Customer VALUES ($1, $2, $3, $4, $5::int8, $6::text::date, $7)",
    )
    .bind(c.customer_id)
    .bind(c.first_name.as_str())
    .bind(c.last_name.as_str())
    .bind(c.address.as_str())
    .bind(c.phone)
    .bind(c.date_of_birth.as_str())
    .bind(c.gender.as_str())
}

pub fn insert_room(r: &NewRoom) -> Statement {
    Statement::new("INSERT INTO Room VALUES ($1, $2, $3)")
        .bind(r.hotel_id)
        .bind(r.room_no)
        .bind(r.room_type.as_str())
}

pub fn insert_maintenance_company(m: &NewMaintenanceCompany) -> Statement {
    Statement::new("INSERT INTO MaintenanceCompany VALUES ($1, $2, $3, $4)")
        .bind(m.company_id)
        .bind(m.name.as_str())
        .bind(m.address.as_str())
        .bind(m.certified)
}

pub fn insert_repair(r: &NewRepair) -> Statement {
    Statement::new("INSERT INTO Repair VALUES ($1, $2, $3, $4, $5::text::date)")
        .bind(r.repair_id)
        .bind(r.hotel_id)
        .bind(r.room_no)
        .bind(r.company_id)
        .bind(r.repair_date.as_str())
}

/// First customer with exactly this name, lowest ID first.
pub fn find_customer_id(first_name: &str, last_name: &str) -> Statement {
    Statement::new(
        "SELECT C.customerID::text AS customerid FROM Customer C \
         WHERE C.fName = $1 AND C.lName = $2 ORDER BY C.customerID LIMIT 1",
    )
    .bind(first_name)
    .bind(last_name)
}

// The surrogate key is MAX(id) + 1 taken inside the INSERT itself. Two
// clients inserting at once can still compute the same key; the primary key
// constraint then rejects the second insert instead of it going through.

pub fn insert_booking(b: &NewBooking) -> Statement {
    Statement::new(
        "INSERT INTO Booking \
         SELECT COALESCE(MAX(bID), 0) + 1, $1::int8, $2::int8, $3::int8, $4::text::date, $5::int8, $6::int8 \
         FROM Booking RETURNING bID::text AS bid",
    )
    .bind(b.customer_id)
    .bind(b.hotel_id)
    .bind(b.room_no)
    .bind(b.booking_date.as_str())
    .bind(b.party_size)
    .bind(b.price)
}

pub fn insert_assignment(a: &NewAssignment) -> Statement {
    Statement::new(
        "INSERT INTO Assigned \
         SELECT COALESCE(MAX(asgID), 0) + 1, $1::int8, $2::int8, $3::int8 \
         FROM Assigned RETURNING asgID::text AS asgid",
    )
    .bind(a.staff_id)
    .bind(a.hotel_id)
    .bind(a.room_no)
}

pub fn insert_request(r: &NewRequest) -> Statement {
    Statement::new(
        "INSERT INTO Request \
         SELECT COALESCE(MAX(reqID), 0) + 1, $1::int8, $2::int8, $3::text::date \
         FROM Request RETURNING reqID::text AS reqid",
    )
    .bind(r.manager_id)
    .bind(r.repair_id)
    .bind(r.request_date.as_str())
}

/// Rooms of a hotel that appear in no booking.
pub fn available_rooms(hotel_id: i64) -> Statement {
    Statement::new(
        "SELECT COUNT(*)::text AS available FROM Room R \
         WHERE R.hotelID = $1 AND NOT EXISTS \
         (SELECT 1 FROM Booking B WHERE B.hotelID = R.hotelID AND B.roomNo = R.roomNo)",
    )
    .bind(hotel_id)
}

pub fn booked_rooms(hotel_id: i64) -> Statement {
    Statement::new(
        "SELECT COUNT(DISTINCT B.roomNo)::text AS booked FROM Booking B WHERE B.hotelID = $1",
    )
    .bind(hotel_id)
}

/// Rooms booked in the seven days starting at `start`.
pub fn bookings_for_week(hotel_id: i64, start: &str) -> Statement {
    Statement::new(
        "SELECT B.roomNo::text AS roomno FROM Booking B \
         WHERE B.hotelID = $1 AND B.bookingDate BETWEEN $2::text::date AND $2::text::date + 6 \
         GROUP BY B.roomNo ORDER BY B.roomNo",
    )
    .bind(hotel_id)
    .bind(start)
}

pub fn top_room_prices(range: &DateRange, k: i64) -> Statement {
    Statement::new(
        "SELECT R.hotelID::text AS hotelid, R.roomNo::text AS roomno, \
         B.price::text AS price, B.bookingDate::text AS bookingdate \
         FROM Room R, Booking B \
         WHERE R.roomNo = B.roomNo AND R.hotelID = B.hotelID \
         AND B.bookingDate BETWEEN $1::text::date AND $2::text::date \
         ORDER BY B.price DESC LIMIT $3",
    )
    .bind(range.from.as_str())
    .bind(range.to.as_str())
    .bind(k)
}

pub fn top_customer_bookings(first_name: &str, last_name: &str, k: i64) -> Statement {
    Statement::new(
        "SELECT B.price::text AS price, B.bID::text AS bid FROM Customer C, Booking B \
         WHERE C.fName = $1 AND C.lName = $2 AND C.customerID = B.customer \
         ORDER BY B.price DESC LIMIT $3",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(k)
}

pub fn customer_total_cost(
    hotel_id: i64,
    first_name: &str,
    last_name: &str,
    range: &DateRange,
) -> Statement {
    Statement::new(
        "SELECT SUM(B.price)::text AS total FROM Booking B \
         WHERE B.hotelID = $1 \
         AND B.customer IN (SELECT C.customerID FROM Customer C WHERE C.fName = $2 AND C.lName = $3) \
         AND B.bookingDate BETWEEN $4::text::date AND $5::text::date",
    )
    .bind(hotel_id)
    .bind(first_name)
    .bind(last_name)
    .bind(range.from.as_str())
    .bind(range.to.as_str())
}

pub fn repairs_by_company(company_name: &str) -> Statement {
    Statement::new(
        "SELECT DISTINCT Rep.rID::text AS rid, Rep.repairType::text AS repairtype, \
         Rep.hotelID::text AS hotelid, Rep.roomNo::text AS roomno \
         FROM Repair Rep, MaintenanceCompany M \
         WHERE M.cmpID = Rep.mCompany AND M.name = $1",
    )
    .bind(company_name)
}

pub fn top_maintenance_companies(k: i64) -> Statement {
    Statement::new(
        "SELECT COUNT(R.rID)::text AS repairs, M.name::text AS name \
         FROM MaintenanceCompany M, Repair R WHERE M.cmpID = R.mCompany \
         GROUP BY M.name ORDER BY COUNT(R.rID) DESC LIMIT $1",
    )
    .bind(k)
}

pub fn repairs_per_year(hotel_id: i64, room_no: i64) -> Statement {
    Statement::new(
        "SELECT DATE_PART('year', Rep.repairDate)::text AS year, COUNT(*)::text AS repairs \
         FROM Repair Rep WHERE Rep.hotelID = $1 AND Rep.roomNo = $2 \
         GROUP BY DATE_PART('year', Rep.repairDate) \
         ORDER BY DATE_PART('year', Rep.repairDate)",
    )
    .bind(hotel_id)
    .bind(room_no)
}
