//! Display formatting for postings and application form fields.
//!
//! Every function here is pure and lenient: malformed input degrades to an
//! empty or placeholder value instead of an error.

mod address;
mod dates;
mod phone;
mod shifts;
mod wage;
mod zipcode;

pub use address::{
    format_address, format_locality, AddressExtra, AddressInput, LOCATION_NOT_SPECIFIED,
};
pub use dates::{
    days_since, days_since_at, is_new_posting, is_new_posting_at, is_within_days,
    is_within_days_at, parse_instant, DateValue, NEW_POSTING_DAYS,
};
pub use phone::format_phone_number;
pub use shifts::{
    format_day_ranges, format_shift_times, ShiftSummary, ShiftTimes, TimeOfDay, WEEK,
};
pub use wage::{format_wage, PayPeriod, WageInput, COMPETITIVE_SALARY, YEARLY_THRESHOLD};
pub use zipcode::format_zipcode;

fn leading_digits(raw: &str, limit: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(limit).collect()
}
