// Router API response types
//
// Field names follow the router's JSON. Large counters are sent as quoted
// decimal strings and decoded through `quoted_u64`.

use serde::{Deserialize, Serialize};

/// Login response: `{"token": "...", "code": 0}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// One full `misystem/status` sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(rename = "dev", default)]
    pub devices: Vec<DeviceStat>,
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub mem: MemStat,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub count: CountStat,
    #[serde(default)]
    pub hardware: HardwareStat,
    #[serde(rename = "upTime", default)]
    pub up_time: String,
    #[serde(default)]
    pub cpu: CpuStat,
    #[serde(default)]
    pub wan: WanStat,
}

/// Per-client traffic counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStat {
    #[serde(default)]
    pub mac: String,
    #[serde(rename = "devname", default)]
    pub name: String,
    /// Seconds online, as reported.
    #[serde(default)]
    pub online: String,
    #[serde(with = "quoted_u64")]
    pub upload: u64,
    #[serde(with = "quoted_u64")]
    pub download: u64,
    #[serde(rename = "upspeed", with = "quoted_u64")]
    pub up_speed: u64,
    #[serde(rename = "downspeed", with = "quoted_u64")]
    pub down_speed: u64,
    #[serde(rename = "maxuploadspeed", with = "quoted_u64")]
    pub max_upload_speed: u64,
    #[serde(rename = "maxdownloadspeed", with = "quoted_u64")]
    pub max_download_speed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemStat {
    /// Fraction in `[0, 1]`.
    #[serde(default)]
    pub usage: f64,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub hz: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountStat {
    #[serde(default)]
    pub all: i64,
    #[serde(default)]
    pub online: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareStat {
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub sn: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuStat {
    #[serde(default)]
    pub core: i64,
    #[serde(default)]
    pub hz: String,
    /// Fraction in `[0, 1]`.
    #[serde(default)]
    pub load: f64,
}

/// WAN interface counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WanStat {
    #[serde(rename = "devname", default)]
    pub name: String,
    /// Comma-separated recent download speeds.
    #[serde(default)]
    pub history: String,
    #[serde(with = "quoted_u64")]
    pub upload: u64,
    #[serde(with = "quoted_u64")]
    pub download: u64,
    #[serde(rename = "upspeed", with = "quoted_u64")]
    pub up_speed: u64,
    #[serde(rename = "downspeed", with = "quoted_u64")]
    pub down_speed: u64,
    #[serde(rename = "maxuploadspeed", with = "quoted_u64")]
    pub max_upload_speed: u64,
    #[serde(rename = "maxdownloadspeed", with = "quoted_u64")]
    pub max_download_speed: u64,
}

impl WanStat {
    /// Parse `history` into samples, skipping entries that are not numbers.
    pub fn history_samples(&self) -> Vec<u64> {
        self.history
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}

/// `misystem/bandwidth_test` result. Speeds are in Mbit/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandwidthResult {
    pub manual: i64,
    pub code: i64,
    pub bandwidth: f64,
    pub bandwidth2: f64,
    pub download: f64,
    pub upload: f64,
}

/// Serde adapter for `u64` values carried as JSON strings (`"408483"`).
///
/// Only strings of ASCII digits are accepted; bare numbers, signs and
/// whitespace fail the decode.
pub mod quoted_u64 {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_str(QuotedU64)
    }

    struct QuotedU64;

    impl Visitor<'_> for QuotedU64 {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal integer in a string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
                return Err(E::invalid_value(de::Unexpected::Str(v), &self));
            }
            v.parse().map_err(E::custom)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn device_json() -> serde_json::Value {
        json!({
            "mac": "00:11:22:33:44:55",
            "maxdownloadspeed": "408483",
            "upload": "88311434",
            "upspeed": "0",
            "downspeed": "0",
            "online": "168914",
            "devname": "client_1",
            "maxuploadspeed": "103678",
            "download": "1878126530"
        })
    }

    #[test]
    fn device_decodes_quoted_counters() {
        let dev: DeviceStat = serde_json::from_value(device_json()).unwrap();
        assert_eq!(dev.max_download_speed, 408_483);
        assert_eq!(dev.max_upload_speed, 103_678);
        assert_eq!(dev.upload, 88_311_434);
        assert_eq!(dev.download, 1_878_126_530);
        assert_eq!(dev.name, "client_1");
        assert_eq!(dev.online, "168914");
    }

    #[test]
    fn device_list_survives_encode_decode() {
        let devices: Vec<DeviceStat> = serde_json::from_value(json!([device_json()])).unwrap();
        let encoded = serde_json::to_value(&devices).unwrap();
        assert_eq!(encoded[0]["maxdownloadspeed"], json!("408483"));
        let decoded: Vec<DeviceStat> = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, devices);
    }

    #[test]
    fn missing_counter_fails_decode() {
        let mut raw = device_json();
        raw.as_object_mut().unwrap().remove("upload");
        assert!(serde_json::from_value::<DeviceStat>(raw).is_err());
    }

    #[test]
    fn non_decimal_counter_fails_decode() {
        for bad in [json!("12a"), json!("-1"), json!(""), json!(12), json!(" 1")] {
            let mut raw = device_json();
            raw["download"] = bad.clone();
            assert!(
                serde_json::from_value::<DeviceStat>(raw).is_err(),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn bandwidth_fields_default() {
        let band: BandwidthResult = serde_json::from_str("{}").unwrap();
        assert_eq!(band, BandwidthResult::default());
    }

    #[test]
    fn wan_history_parses_numbers() {
        let wan = WanStat {
            history: "0,200829,180511,,x,429".into(),
            ..WanStat::default()
        };
        assert_eq!(wan.history_samples(), vec![0, 200_829, 180_511, 429]);
        assert!(WanStat::default().history_samples().is_empty());
    }
}
