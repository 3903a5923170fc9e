use chrono::NaiveDate;

use crate::model::RegistrationRecord;

/// Export column order. Fixed; consumers parse by position.
pub const CSV_HEADERS: [&str; 9] = [
    "Registration Number",
    "Name",
    "Age",
    "Gender",
    "Mobile",
    "Address",
    "Status",
    "Phone Verified",
    "Registration Date",
];

fn quote(field: &str) -> String {
    // Every field is quoted unconditionally; embedded quotes are doubled.
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize the currently visible (filtered) set to CSV: one header row,
/// then one row per record in display order.
pub fn export_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a RegistrationRecord>,
{
    let header: Vec<String> = CSV_HEADERS.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![row(&header)];

    for rec in records {
        lines.push(row(&[
            rec.registration_number.clone(),
            rec.name.clone(),
            rec.age.clone(),
            rec.gender.as_str().to_string(),
            rec.mobile.clone(),
            rec.address.clone(),
            rec.status.as_str().to_string(),
            if rec.phone_verified { "Yes" } else { "No" }.to_string(),
            rec.created_date(),
        ]));
    }

    lines.join("\n")
}

/// Download filename for an export taken on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("karate_registrations_{}.csv", date.format("%Y-%m-%d"))
}
