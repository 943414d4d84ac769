//! Input document loading

use crate::models::LoginEvent;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load the ordered login-event list from a persisted JSON array document
///
/// Field-level gaps are tolerated (absent fields default to empty strings);
/// a missing file or a document that is not a JSON array is an error.
pub fn load_login_events(path: &Path) -> Result<Vec<LoginEvent>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let events: Vec<LoginEvent> = serde_json::from_reader(reader)?;

    log::info!("Loaded {} login event(s) from {:?}", events.len(), path);
    Ok(events)
}
