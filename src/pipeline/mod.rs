//! End-to-end enrichment pipeline
//!
//! Explicit entry point over an already-loaded event list: resolve source
//! IPs, join the locations back onto the events, fold into the per-user
//! breakdown. All file I/O stays with the caller.

use crate::enrich::enrich_events;
use crate::geolocation::{GeoLookupClient, LookupError};
use crate::models::{EnrichedRecord, LoginEvent};
use crate::report::Breakdown;

/// Artifacts produced by one pipeline run
pub struct PipelineArtifacts {
    pub enriched: Vec<EnrichedRecord>,
    pub breakdown: Breakdown,
}

/// Run the enrichment pipeline over `events`
///
/// A transport-level lookup failure aborts the run; a failed batch only
/// degrades the affected IPs to empty location fields.
pub async fn run(
    events: &[LoginEvent],
    client: &GeoLookupClient,
) -> Result<PipelineArtifacts, LookupError> {
    let locations = client.resolve_events(events).await?;
    log::info!(
        "Resolved {} location entr(ies) for {} event(s)",
        locations.len(),
        events.len()
    );

    let enriched = enrich_events(events, &locations);
    let breakdown = Breakdown::from_records(&enriched);

    Ok(PipelineArtifacts { enriched, breakdown })
}
