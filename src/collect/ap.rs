use super::{MapCoordinate, RecordError};
use serde::Deserialize;

pub const AP_HEADER: [&str; 10] = [
    "radioMacAddress",
    "name",
    "x",
    "y",
    "unit",
    "802_11_BChannelNumber",
    "802_11_BTxPowerLevel",
    "802_11_AChannelNumber",
    "802_11_ATxPowerLevel",
    "floorId",
];

/// One access-point entry from the CMX configuration API. Carries no client
/// identifiers, so nothing here is anonymized.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApRecord {
    pub radio_mac_address: String,
    pub name: String,
    pub map_coordinates: MapCoordinate,
    pub ap_interfaces: Vec<ApInterface>,
    pub floor_id_string: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApInterface {
    pub channel_number: i64,
    pub tx_power_level: i64,
}

/// Decodes one payload entry into an output row. Dual-radio APs report both
/// interfaces; single-radio APs get the second channel/power pair defaulted
/// to zero. Any other interface count is malformed data for that record.
pub fn decode_row(entry: serde_json::Value) -> Result<Vec<String>, RecordError> {
    let record: ApRecord = serde_json::from_value(entry)?;

    let (b_radio, a_radio) = match record.ap_interfaces.as_slice() {
        [b, a] => ((b.channel_number, b.tx_power_level), (a.channel_number, a.tx_power_level)),
        [b] => ((b.channel_number, b.tx_power_level), (0, 0)),
        other => return Err(RecordError::InterfaceCount(other.len())),
    };

    Ok(vec![
        record.radio_mac_address,
        record.name,
        record.map_coordinates.x.to_string(),
        record.map_coordinates.y.to_string(),
        record.map_coordinates.unit,
        b_radio.0.to_string(),
        b_radio.1.to_string(),
        a_radio.0.to_string(),
        a_radio.1.to_string(),
        record.floor_id_string,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_ap(interfaces: serde_json::Value) -> serde_json::Value {
        json!({
            "radioMacAddress": "00:2b:01:00:05:f0",
            "name": "AP-Floor1-East",
            "mapCoordinates": { "x": 10.0, "y": 20.0, "unit": "FEET" },
            "apInterfaces": interfaces,
            "floorIdString": "727035700041482262"
        })
    }

    #[test]
    fn test_dual_radio_row() {
        let entry = sample_ap(json!([
            { "channelNumber": 11, "txPowerLevel": 4 },
            { "channelNumber": 36, "txPowerLevel": 2 }
        ]));
        let row = decode_row(entry).unwrap();
        assert_eq!(row.len(), AP_HEADER.len());
        assert_eq!(&row[5..9], ["11", "4", "36", "2"]);
    }

    #[test]
    fn test_single_radio_defaults_second_interface_to_zero() {
        let entry = sample_ap(json!([{ "channelNumber": 6, "txPowerLevel": 5 }]));
        let row = decode_row(entry).unwrap();
        assert_eq!(&row[5..9], ["6", "5", "0", "0"]);
    }

    #[test]
    fn test_unexpected_interface_count_is_rejected() {
        let entry = sample_ap(json!([]));
        let err = decode_row(entry).unwrap_err();
        assert!(matches!(err, RecordError::InterfaceCount(0)));

        let entry = sample_ap(json!([
            { "channelNumber": 1, "txPowerLevel": 1 },
            { "channelNumber": 2, "txPowerLevel": 2 },
            { "channelNumber": 3, "txPowerLevel": 3 }
        ]));
        assert!(matches!(
            decode_row(entry).unwrap_err(),
            RecordError::InterfaceCount(3)
        ));
    }
}
