use crate::objects::Id;
use chrono::{DateTime, Utc};
use rgb::RGB8;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use std::sync::Arc;

pub fn from_millis(ms: i64) -> Result<DateTime<Utc>, String> {
    DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| format!("{ms} is not a valid time"))
}

pub fn deserialize_millis<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = i64::deserialize(deserializer)?;
    from_millis(ms).map_err(de::Error::custom)
}

pub fn serialize_millis<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(time.timestamp_millis())
}

/// The API uses `0` when a time is unknown (no real time prediction, no location update...)
pub fn deserialize_optional_millis<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None | Some(0) => Ok(None),
        Some(ms) => from_millis(ms).map(Some).map_err(de::Error::custom),
    }
}

pub fn serialize_optional_millis<S>(
    time: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(time.map(|t| t.timestamp_millis()).unwrap_or(0))
}

pub fn parse_color(s: &str) -> Result<Option<RGB8>, crate::Error> {
    let s = s.trim_start_matches('#');
    if s.is_empty() {
        return Ok(None);
    }
    if s.len() != 6 {
        return Err(crate::Error::InvalidColor(s.to_owned()));
    }
    let component = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .ok_or_else(|| crate::Error::InvalidColor(s.to_owned()))
    };
    Ok(Some(RGB8::new(component(0..2)?, component(2..4)?, component(4..6)?)))
}

pub fn deserialize_color<'de, D>(de: D) -> Result<Option<RGB8>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de)
        .and_then(|s| parse_color(&s.unwrap_or_default()).map_err(de::Error::custom))
}

pub fn serialize_color<S>(color: &Option<RGB8>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match color {
        None => serializer.serialize_str(""),
        Some(c) => {
            serializer.serialize_str(format!("{:02X}{:02X}{:02X}", c.r, c.g, c.b).as_str())
        }
    }
}

pub fn de_with_empty_default<'de, T, D>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(|opt| opt.unwrap_or_default())
}

/// Writes a resolved object back as the id it was resolved from
pub fn serialize_id<S, T>(object: &Arc<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Id,
{
    serializer.serialize_str(object.id())
}

pub fn serialize_ids<S, T>(objects: &[Arc<T>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Id,
{
    let mut seq = serializer.serialize_seq(Some(objects.len()))?;
    for o in objects {
        seq.serialize_element(o.id())?;
    }
    seq.end()
}

#[test]
fn test_serialize_millis() {
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Test {
        #[serde(
            deserialize_with = "deserialize_millis",
            serialize_with = "serialize_millis"
        )]
        service_date: DateTime<Utc>,
        #[serde(
            default,
            deserialize_with = "deserialize_optional_millis",
            serialize_with = "serialize_optional_millis"
        )]
        predicted_arrival_time: Option<DateTime<Utc>>,
    }
    let data_in = r#"{"serviceDate":1270537200000,"predictedArrivalTime":0}"#;
    let parsed: Test = serde_json::from_str(data_in).unwrap();
    assert_eq!(1_270_537_200, parsed.service_date.timestamp());
    assert_eq!(None, parsed.predicted_arrival_time);
    assert_eq!(data_in, serde_json::to_string(&parsed).unwrap());

    let parsed: Test = serde_json::from_str(r#"{"serviceDate":1270537200000}"#).unwrap();
    assert_eq!(None, parsed.predicted_arrival_time);
}

#[test]
fn test_parse_color() {
    assert_eq!(None, parse_color("").unwrap());
    assert_eq!(Some(RGB8::new(255, 0, 16)), parse_color("FF0010").unwrap());
    assert_eq!(Some(RGB8::new(0, 0, 0)), parse_color("#000000").unwrap());
    assert!(parse_color("FF00").is_err());
    assert!(parse_color("GG0000").is_err());
}
