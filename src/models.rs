//! Records gathered from the prompts before they are written to the store.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: i64,
    /// As typed, e.g. `01/01/90`; the server parses it.
    pub date_of_birth: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub hotel_id: i64,
    pub room_no: i64,
    pub room_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaintenanceCompany {
    pub company_id: i64,
    pub name: String,
    pub address: String,
    pub certified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepair {
    pub repair_id: i64,
    pub hotel_id: i64,
    pub room_no: i64,
    pub company_id: i64,
    pub repair_date: String,
}

/// The booking ID is not part of the record; it is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_id: i64,
    pub hotel_id: i64,
    pub room_no: i64,
    pub booking_date: String,
    pub party_size: i64,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    pub staff_id: i64,
    pub hotel_id: i64,
    pub room_no: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    pub manager_id: i64,
    pub repair_id: i64,
    pub request_date: String,
}

/// An inclusive range of dates as typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}
