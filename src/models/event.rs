use serde::{Deserialize, Serialize};

/// A single authentication login event as exported by the upstream audit log.
///
/// Field names on the wire are PascalCase; any field may be absent or empty
/// and defaults to the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginEvent {
    #[serde(default, rename = "UserId")]
    pub user_id: String,
    #[serde(default, rename = "ClientIP")]
    pub client_ip: String,
    #[serde(default, rename = "CreationTime")]
    pub creation_time: String,
    #[serde(default, rename = "ResultStatus")]
    pub result_status: String,
    #[serde(default, rename = "Operation")]
    pub operation: String,
}

/// A login event joined with its resolved geolocation fields.
///
/// One record is produced per input event, in input order. Location fields
/// are empty strings when the event's IP could not be resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(rename = "UserId")]
    pub user_id: String,
    #[serde(rename = "ClientIP")]
    pub client_ip: String,
    #[serde(rename = "CreationTime")]
    pub creation_time: String,
    #[serde(rename = "ResultStatus")]
    pub result_status: String,
    #[serde(rename = "Operation")]
    pub operation: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub isp: String,
    pub error: String,
}
