//! Flattened rendering of the login breakdown
//!
//! The breakdown's nested shape does not fit a regular tabular layout, so
//! it gets a specialized two-level form: a row per user followed by one row
//! per location, the location rows marked by a leading empty field.

use crate::report::breakdown::Breakdown;

/// Render `breakdown` as the two-level flattened CSV text
///
/// Users appear in the map's insertion order, locations in first-insertion
/// order within each user. Field values are written verbatim; a comma
/// inside a value is not escaped.
pub fn format_breakdown_csv(breakdown: &Breakdown) -> String {
    let mut csv = String::new();
    csv.push_str("User Email,Number of Logins\n");

    for (user_id, user) in breakdown.user_info.iter() {
        csv.push_str(&format!("{},{}\n", user_id, user.number_of_logins));
        for location in &user.login_locations {
            csv.push_str(&format!(
                ",{},{},{},{}\n",
                location.country, location.region, location.city, location.number_of_logins
            ));
        }
    }

    csv
}
