use super::{MapCoordinate, RecordError};
use crate::anonymize::anonymize;
use serde::Deserialize;

/// Column order of the client telemetry snapshot. `band` appears twice on
/// purpose: once for the strongest-detecting radio, once for the client's
/// association band, matching the upstream payload.
pub const CLIENT_HEADER: [&str; 27] = [
    "hash",
    "mapHierarchyString",
    "floorRefId",
    "length",
    "width",
    "x",
    "y",
    "unit",
    "currentlyTracked",
    "confidenceFactor",
    "currentServerTime",
    "firstLocatedTime",
    "lastLocatedTime",
    "maxDetectedRssiApMacAddress",
    "band",
    "rssi",
    "lastHeardInSeconds",
    "networkStatus",
    "changedOn",
    "ssId",
    "band",
    "apMacAddress",
    "dot11Status",
    "manufacturer",
    "detectingControllers",
    "bytesSent",
    "bytesReceived",
];

/// One client-device entry as returned by the CMX location API. Every field
/// is required; the descriptive metadata fields additionally accept `null`
/// (rendered as an empty cell), which CMX sends for clients that are probing
/// but not associated. A record missing any key is malformed and is skipped
/// and counted rather than padded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub mac_address: String,
    pub map_info: MapInfo,
    pub map_coordinate: MapCoordinate,
    pub currently_tracked: bool,
    pub confidence_factor: f64,
    pub statistics: ClientStatistics,
    #[serde(deserialize_with = "nullable")]
    pub network_status: Option<String>,
    pub changed_on: i64,
    #[serde(deserialize_with = "nullable")]
    pub ss_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub band: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub ap_mac_address: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub dot11_status: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub manufacturer: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub detecting_controllers: Option<String>,
    pub bytes_sent: i64,
    pub bytes_received: i64,
}

/// Nullable but required: the key must be present in the payload, its value
/// may be `null`. A `deserialize_with` field carries no implicit default, so
/// an absent key stays a decode error for that record.
fn nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapInfo {
    pub map_hierarchy_string: String,
    pub floor_ref_id: i64,
    pub floor_dimension: FloorDimension,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorDimension {
    pub length: f64,
    pub width: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStatistics {
    pub current_server_time: String,
    pub first_located_time: String,
    pub last_located_time: String,
    pub max_detected_rssi: MaxDetectedRssi,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxDetectedRssi {
    pub ap_mac_address: String,
    pub band: String,
    pub rssi: f64,
    pub last_heard_in_seconds: i64,
}

/// Decodes one payload entry into an output row with the raw MAC replaced by
/// its anonymization token. A record with an empty identifier is ambiguous
/// upstream data and is rejected rather than hashed.
pub fn decode_row(entry: serde_json::Value, salt: &str) -> Result<Vec<String>, RecordError> {
    let record: ClientRecord = serde_json::from_value(entry)?;
    if record.mac_address.is_empty() {
        return Err(RecordError::EmptyIdentifier);
    }

    let token = anonymize(salt, &record.mac_address);
    Ok(vec![
        token,
        record.map_info.map_hierarchy_string,
        record.map_info.floor_ref_id.to_string(),
        record.map_info.floor_dimension.length.to_string(),
        record.map_info.floor_dimension.width.to_string(),
        record.map_coordinate.x.to_string(),
        record.map_coordinate.y.to_string(),
        record.map_coordinate.unit,
        record.currently_tracked.to_string(),
        record.confidence_factor.to_string(),
        record.statistics.current_server_time,
        record.statistics.first_located_time,
        record.statistics.last_located_time,
        record.statistics.max_detected_rssi.ap_mac_address,
        record.statistics.max_detected_rssi.band,
        record.statistics.max_detected_rssi.rssi.to_string(),
        record
            .statistics
            .max_detected_rssi
            .last_heard_in_seconds
            .to_string(),
        record.network_status.unwrap_or_default(),
        record.changed_on.to_string(),
        record.ss_id.unwrap_or_default(),
        record.band.unwrap_or_default(),
        record.ap_mac_address.unwrap_or_default(),
        record.dot11_status.unwrap_or_default(),
        record.manufacturer.unwrap_or_default(),
        record.detecting_controllers.unwrap_or_default(),
        record.bytes_sent.to_string(),
        record.bytes_received.to_string(),
    ])
}
