//! Joining login events with their resolved locations

use crate::geolocation::LocationResult;
use crate::models::{EnrichedRecord, LoginEvent};
use std::collections::HashMap;

/// Index lookup results by their echoed `query` IP
///
/// Chunk-level error entries carry no `query` and cannot be keyed, so they
/// drop out here; the events behind them enrich with empty location fields.
pub fn build_location_map(results: &[LocationResult]) -> HashMap<&str, &LocationResult> {
    let mut map = HashMap::new();
    for result in results {
        if let Some(ref query) = result.query {
            map.insert(query.as_str(), result);
        }
    }
    map
}

/// Produce one enriched record per login event, preserving input order
///
/// Events whose IP has no resolved location get empty strings for every
/// location field. The service's `regionName` is carried as `region`.
pub fn enrich_events(events: &[LoginEvent], results: &[LocationResult]) -> Vec<EnrichedRecord> {
    let locations = build_location_map(results);
    let unresolved = LocationResult::default();

    events
        .iter()
        .map(|event| {
            let location = locations
                .get(event.client_ip.as_str())
                .copied()
                .unwrap_or(&unresolved);

            EnrichedRecord {
                user_id: event.user_id.clone(),
                client_ip: event.client_ip.clone(),
                creation_time: event.creation_time.clone(),
                result_status: event.result_status.clone(),
                operation: event.operation.clone(),
                country: location.country.clone().unwrap_or_default(),
                region: location.region_name.clone().unwrap_or_default(),
                city: location.city.clone().unwrap_or_default(),
                isp: location.isp.clone().unwrap_or_default(),
                error: location.error.clone().unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(user_id: &str, client_ip: &str) -> LoginEvent {
        LoginEvent {
            user_id: user_id.to_string(),
            client_ip: client_ip.to_string(),
            creation_time: "2023-11-02T08:15:00".to_string(),
            result_status: "Succeeded".to_string(),
            operation: "UserLoggedIn".to_string(),
        }
    }

    fn resolved(query: &str, country: &str, region_name: &str, city: &str) -> LocationResult {
        LocationResult {
            query: Some(query.to_string()),
            country: Some(country.to_string()),
            region_name: Some(region_name.to_string()),
            city: Some(city.to_string()),
            isp: Some("Example ISP".to_string()),
            error: None,
        }
    }

    #[test]
    fn test_one_record_per_event_in_input_order() {
        let events = vec![
            event("a@example.com", "1.1.1.1"),
            event("b@example.com", "2.2.2.2"),
            event("a@example.com", "1.1.1.1"),
        ];
        let results = vec![
            resolved("1.1.1.1", "United States", "California", "Los Angeles"),
            resolved("2.2.2.2", "France", "Ile-de-France", "Paris"),
        ];

        let records = enrich_events(&events, &results);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].user_id, "a@example.com");
        assert_eq!(records[0].city, "Los Angeles");
        assert_eq!(records[1].city, "Paris");
        assert_eq!(records[2].city, "Los Angeles");
    }

    #[test]
    fn test_region_name_is_carried_as_region() {
        let events = vec![event("a@example.com", "1.1.1.1")];
        let results = vec![resolved("1.1.1.1", "United States", "Virginia", "Ashburn")];

        let records = enrich_events(&events, &results);

        assert_eq!(records[0].region, "Virginia");
        assert_eq!(records[0].isp, "Example ISP");
        assert_eq!(records[0].error, "");
    }

    #[test]
    fn test_unresolved_ip_yields_empty_location_fields() {
        let events = vec![event("a@example.com", "9.9.9.9")];
        let records = enrich_events(&events, &[]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, "a@example.com");
        assert_eq!(records[0].client_ip, "9.9.9.9");
        assert_eq!(records[0].country, "");
        assert_eq!(records[0].region, "");
        assert_eq!(records[0].city, "");
        assert_eq!(records[0].isp, "");
        assert_eq!(records[0].error, "");
    }

    #[test]
    fn test_chunk_error_entries_are_not_indexed() {
        let events = vec![event("a@example.com", "1.1.1.1")];
        let results = vec![LocationResult::batch_error("rate limited")];

        let records = enrich_events(&events, &results);

        // The chunk error has no query, so the event stays unresolved and
        // its error column stays empty.
        assert_eq!(records[0].country, "");
        assert_eq!(records[0].error, "");
    }

    #[test]
    fn test_per_ip_service_error_is_copied() {
        let events = vec![event("a@example.com", "10.0.0.1")];
        let results = vec![LocationResult {
            query: Some("10.0.0.1".to_string()),
            error: Some("private range".to_string()),
            ..Default::default()
        }];

        let records = enrich_events(&events, &results);

        assert_eq!(records[0].error, "private range");
        assert_eq!(records[0].country, "");
    }
}
