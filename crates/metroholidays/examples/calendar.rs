//! Print the 2020 New Year calendar for the default countries.
//!
//! ```text
//! HOLIDAYS_API_URL=https://holidays.example.com/ \
//! HOLIDAYS_API_USER=user HOLIDAYS_API_PASSWORD=pwd \
//! cargo run -p metroholidays --example calendar
//! ```

use metroholidays::{BlockingHolidaysClient, DEFAULT_COUNTRIES};
use time::macros::date;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BlockingHolidaysClient::from_env()?;
    let table = client.load_calendar(
        date!(2019 - 12 - 28),
        date!(2020 - 01 - 05),
        DEFAULT_COUNTRIES,
        true,
    )?;

    for (date, rows) in table.by_date() {
        let cells = rows
            .iter()
            .map(|row| format!("{}={}/{}", row.country_code, u8::from(row.is_holiday), row.day_type))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{date} {cells}");
    }

    Ok(())
}
