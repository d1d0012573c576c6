use crate::serde_helpers::*;
use crate::Error;
use chrono::{DateTime, Utc};
use rgb::RGB8;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Objects that can be referenced by id from another object
pub trait Id {
    fn id(&self) -> &str;
}

pub trait Type {
    const OBJECT_TYPE: ObjectType;
}

/// Kinds of objects shipped in the `references` of a response
#[derive(Debug, Serialize, Eq, PartialEq, Hash, Clone, Copy)]
pub enum ObjectType {
    Agency,
    Route,
    Stop,
    Trip,
    Situation,
}

macro_rules! referenced_object {
    ($object:ty, $object_type:expr) => {
        impl Id for $object {
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl Type for $object {
            const OBJECT_TYPE: ObjectType = $object_type;
        }
    };
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LocationType {
    #[derivative(Default)]
    StopPoint,
    StopArea,
    StationEntrance,
    GenericNode,
    BoardingArea,
    Unknown(i32),
}

impl<'de> Deserialize<'de> for LocationType {
    fn deserialize<D>(deserializer: D) -> Result<LocationType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let i = i32::deserialize(deserializer)?;
        Ok(match i {
            0 => LocationType::StopPoint,
            1 => LocationType::StopArea,
            2 => LocationType::StationEntrance,
            3 => LocationType::GenericNode,
            4 => LocationType::BoardingArea,
            i => LocationType::Unknown(i),
        })
    }
}

impl Serialize for LocationType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(match self {
            LocationType::StopPoint => 0,
            LocationType::StopArea => 1,
            LocationType::StationEntrance => 2,
            LocationType::GenericNode => 3,
            LocationType::BoardingArea => 4,
            LocationType::Unknown(i) => *i,
        })
    }
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RouteType {
    Tramway,
    Subway,
    Rail,
    #[derivative(Default)]
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
    // Agencies publish extended route types (hundreds) that are still valid for OneBusAway
    Other(u16),
}

impl<'de> Deserialize<'de> for RouteType {
    fn deserialize<D>(deserializer: D) -> Result<RouteType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let i = u16::deserialize(deserializer)?;
        Ok(match i {
            0 => RouteType::Tramway,
            1 => RouteType::Subway,
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            4 => RouteType::Ferry,
            5 => RouteType::CableCar,
            6 => RouteType::Gondola,
            7 => RouteType::Funicular,
            _ => RouteType::Other(i),
        })
    }
}

impl Serialize for RouteType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(match self {
            RouteType::Tramway => 0,
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
            RouteType::CableCar => 5,
            RouteType::Gondola => 6,
            RouteType::Funicular => 7,
            RouteType::Other(i) => *i,
        })
    }
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WheelchairBoarding {
    Accessible,
    NotAccessible,
    #[derivative(Default)]
    #[serde(other)]
    Unknown,
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PickupDropOffType {
    #[derivative(Default)]
    Regular,
    NotAvailable,
    ArrangeByPhone,
    CoordinateWithDriver,
    Unknown(i32),
}

impl<'de> Deserialize<'de> for PickupDropOffType {
    fn deserialize<D>(deserializer: D) -> Result<PickupDropOffType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let i = i32::deserialize(deserializer)?;
        Ok(match i {
            0 => PickupDropOffType::Regular,
            1 => PickupDropOffType::NotAvailable,
            2 => PickupDropOffType::ArrangeByPhone,
            3 => PickupDropOffType::CoordinateWithDriver,
            i => PickupDropOffType::Unknown(i),
        })
    }
}

impl Serialize for PickupDropOffType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(match self {
            PickupDropOffType::Regular => 0,
            PickupDropOffType::NotAvailable => 1,
            PickupDropOffType::ArrangeByPhone => 2,
            PickupDropOffType::CoordinateWithDriver => 3,
            PickupDropOffType::Unknown(i) => *i,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Agency {
    pub disclaimer: String,
    pub email: String,
    pub fare_url: String,
    pub id: String,
    pub lang: String,
    pub name: String,
    pub phone: String,
    pub private_service: bool,
    pub timezone: String,
    pub url: String,
}

referenced_object!(Agency, ObjectType::Agency);

impl fmt::Display for Agency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An agency and the area its data covers
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgencyWithCoverage {
    #[serde(rename = "agencyId", serialize_with = "serialize_id")]
    pub agency: Arc<Agency>,
    pub lat: f64,
    pub lat_span: f64,
    pub lon: f64,
    pub lon_span: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Zero-value agency when the agency is not in the references
    #[serde(skip)]
    pub agency: Arc<Agency>,
    /// Id of the agency as sent by the server, kept even when it could not be resolved
    pub agency_id: String,
    #[serde(serialize_with = "serialize_color")]
    pub color: Option<RGB8>,
    pub description: String,
    pub id: String,
    pub long_name: String,
    pub short_name: String,
    #[serde(serialize_with = "serialize_color")]
    pub text_color: Option<RGB8>,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    pub url: String,
}

referenced_object!(Route, ObjectType::Route);

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.long_name.is_empty() {
            write!(f, "{}", self.long_name)
        } else {
            write!(f, "{}", self.short_name)
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub code: String,
    pub direction: String,
    pub id: String,
    pub lat: f64,
    pub location_type: LocationType,
    pub lon: f64,
    pub name: String,
    pub parent: String,
    /// Only the routes present in the references, in the order of the response
    #[serde(rename = "routeIds", serialize_with = "serialize_ids")]
    pub routes: Vec<Arc<Route>>,
    pub wheelchair_boarding: WheelchairBoarding,
}

referenced_object!(Stop, ObjectType::Stop);

impl Stop {
    pub fn location(&self) -> Location {
        Location {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Trip {
    /// Trips of the same block are operated one after another by the same vehicle
    pub block_id: String,
    /// `0` or `1`, empty when the feed does not set it
    pub direction_id: String,
    pub id: String,
    pub route_id: String,
    /// Overrides the short name of the route for this trip when not empty
    pub route_short_name: String,
    /// Calendar of the days the trip runs
    pub service_id: String,
    /// Id to pass to [crate::Client::shape]
    pub shape_id: String,
    pub time_zone: String,
    pub trip_headsign: String,
    pub trip_short_name: String,
}

referenced_object!(Trip, ObjectType::Trip);

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route id: {}, service id: {}",
            self.route_id, self.service_id
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TranslatedString {
    pub lang: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct TimeWindow {
    #[serde(
        deserialize_with = "deserialize_optional_millis",
        serialize_with = "serialize_optional_millis"
    )]
    pub from: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "deserialize_optional_millis",
        serialize_with = "serialize_optional_millis"
    )]
    pub to: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// An open bound contains every time on its side
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| from <= time) && self.to.map_or(true, |to| time <= to)
    }
}

/// What a [Situation] applies to, empty fields are wildcards
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Affects {
    pub agency_id: String,
    pub application_id: String,
    pub direction_id: String,
    pub route_id: String,
    pub stop_id: String,
    pub trip_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversion_path: Option<EncodedPolyline>,
    pub diversion_stop_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Consequence {
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_details: Option<ConditionDetails>,
}

/// A service alert shown to riders
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Situation {
    pub active_windows: Vec<TimeWindow>,
    pub all_affects: Vec<Affects>,
    pub consequences: Vec<Consequence>,
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub creation_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<TranslatedString>,
    pub id: String,
    pub publication_windows: Vec<TimeWindow>,
    pub reason: String,
    pub severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TranslatedString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<TranslatedString>,
}

referenced_object!(Situation, ObjectType::Situation);

impl Situation {
    /// A situation without active windows is always active
    pub fn is_active(&self, time: DateTime<Utc>) -> bool {
        self.active_windows.is_empty() || self.active_windows.iter().any(|w| w.contains(time))
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.summary {
            Some(summary) => write!(f, "{}", summary.value),
            None => write!(f, "{}", self.id),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Frequency {
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub end_time: DateTime<Utc>,
    /// Seconds between two departures
    pub headway_secs: i64,
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub start_time: DateTime<Utc>,
}

/// Real time position of a vehicle along its trip
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TripStatus {
    /// Trip the vehicle is serving now, may differ from the trip asked for when it runs late on its block
    pub active_trip_id: String,
    /// Index of the active trip in its block
    pub block_trip_sequence: i32,
    #[serde(serialize_with = "serialize_id")]
    pub closest_stop: Arc<Stop>,
    /// Seconds until the vehicle reaches the closest stop, negative once passed
    pub closest_stop_time_offset: i64,
    /// Meters from the start of the trip
    pub distance_along_trip: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    pub last_known_distance_along_trip: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_known_location: Option<Location>,
    /// Degrees counter clockwise from east, `0` when unknown
    pub last_known_orientation: f64,
    #[serde(serialize_with = "serialize_optional_millis")]
    /// `None` when the server sent `0`
    pub last_location_update_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_optional_millis")]
    pub last_update_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_id")]
    pub next_stop: Arc<Stop>,
    /// Seconds until the vehicle reaches the next stop
    pub next_stop_time_offset: i64,
    pub orientation: f64,
    /// `in_progress`, `deadhead_before`, `layover_during`...
    pub phase: String,
    pub position: Location,
    /// Real time data is available, otherwise the position is interpolated from the schedule
    pub predicted: bool,
    /// In seconds, positive when late
    pub schedule_deviation: i64,
    pub scheduled_distance_along_trip: f64,
    #[serde(serialize_with = "serialize_millis")]
    /// Midnight of the service day, local time of the agency
    pub service_date: DateTime<Utc>,
    #[serde(rename = "situationIds", serialize_with = "serialize_ids")]
    pub situations: Vec<Arc<Situation>>,
    pub status: String,
    pub total_distance_along_trip: f64,
    pub vehicle_id: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalAndDeparture {
    /// `None` when the response does not say, which is not the same as `Some(false)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_enabled: Option<bool>,
    pub block_trip_sequence: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_enabled: Option<bool>,
    /// Meters between the vehicle and the stop
    pub distance_from_stop: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(serialize_with = "serialize_optional_millis")]
    pub last_update_time: Option<DateTime<Utc>>,
    /// Negative once the vehicle has passed the stop
    pub number_of_stops_away: i32,
    pub predicted: bool,
    #[serde(serialize_with = "serialize_optional_millis")]
    /// `None` when the server sent `0`, no real time prediction
    pub predicted_arrival_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_optional_millis")]
    pub predicted_departure_time: Option<DateTime<Utc>>,
    pub route_id: String,
    pub route_long_name: String,
    pub route_short_name: String,
    #[serde(serialize_with = "serialize_millis")]
    pub scheduled_arrival_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_millis")]
    pub scheduled_departure_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_millis")]
    pub service_date: DateTime<Utc>,
    #[serde(rename = "situationIds", serialize_with = "serialize_ids")]
    pub situations: Vec<Arc<Situation>>,
    pub status: String,
    pub stop_id: String,
    /// Position of the stop in the trip, starting at 0
    pub stop_sequence: i32,
    pub total_stops_in_trip: i32,
    pub trip_headsign: String,
    pub trip_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_status: Option<TripStatus>,
    pub vehicle_id: String,
}

impl ArrivalAndDeparture {
    /// Predicted arrival time when known, scheduled one otherwise
    pub fn best_arrival_time(&self) -> DateTime<Utc> {
        self.predicted_arrival_time
            .unwrap_or(self.scheduled_arrival_time)
    }

    pub fn best_departure_time(&self) -> DateTime<Utc> {
        self.predicted_departure_time
            .unwrap_or(self.scheduled_departure_time)
    }
}

/// Entry of the arrivals-and-departures-for-stop method
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StopWithArrivalsAndDepartures {
    pub arrivals_and_departures: Vec<ArrivalAndDeparture>,
    #[serde(rename = "nearbyStopIds", serialize_with = "serialize_ids")]
    pub nearby_stops: Vec<Arc<Stop>>,
    #[serde(rename = "situationIds", serialize_with = "serialize_ids")]
    pub situations: Vec<Arc<Situation>>,
    #[serde(rename = "stopId", serialize_with = "serialize_id")]
    pub stop: Arc<Stop>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopTime {
    /// Seconds since the start of the service day
    pub arrival_time: i64,
    /// Seconds since the start of the service day
    pub departure_time: i64,
    pub drop_off_type: PickupDropOffType,
    pub pickup_type: PickupDropOffType,
    pub stop_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStopTime {
    /// Seconds of layover accumulated since the start of the block
    pub accumulated_slack_time: f64,
    pub block_sequence: u32,
    /// Meters
    pub distance_along_block: f64,
    pub stop_time: StopTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockTrip {
    pub accumulated_slack_time: f64,
    pub block_stop_times: Vec<BlockStopTime>,
    pub distance_along_block: f64,
    pub trip_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockConfiguration {
    pub active_service_ids: Vec<String>,
    pub inactive_service_ids: Vec<String>,
    pub trips: Vec<BlockTrip>,
}

/// Sequence of trips operated by the same vehicle during a service day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    pub configurations: Vec<BlockConfiguration>,
    pub id: String,
}

impl Block {
    pub fn trip_ids(&self) -> impl Iterator<Item = &str> {
        self.configurations
            .iter()
            .flat_map(|c| c.trips.iter())
            .map(|t| t.trip_id.as_str())
    }
}

/// Polyline in the [Google encoded format], also the entry of the shape method
///
/// [Google encoded format](https://developers.google.com/maps/documentation/utilities/polylinealgorithm)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EncodedPolyline {
    pub length: u32,
    pub levels: String,
    pub points: String,
}

impl EncodedPolyline {
    pub fn decode(&self) -> Result<Vec<Location>, Error> {
        let bytes = self.points.as_bytes();
        let mk_err = || Error::InvalidPolyline(self.points.clone());
        let mut index = 0;
        let (mut lat, mut lon) = (0i64, 0i64);
        let mut points = Vec::new();
        while index < bytes.len() {
            lat = next_polyline_value(bytes, &mut index)
                .and_then(|d| lat.checked_add(d))
                .ok_or_else(mk_err)?;
            lon = next_polyline_value(bytes, &mut index)
                .and_then(|d| lon.checked_add(d))
                .ok_or_else(mk_err)?;
            points.push(Location {
                lat: lat as f64 / 1e5,
                lon: lon as f64 / 1e5,
            });
        }
        Ok(points)
    }
}

fn next_polyline_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result = 0i64;
    let mut shift = 0;
    loop {
        let chunk = i64::from(*bytes.get(*index)?) - 63;
        if !(0..64).contains(&chunk) || shift > 60 {
            return None;
        }
        *index += 1;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    Some(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleStopTime {
    pub arrival_enabled: bool,
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub arrival_time: DateTime<Utc>,
    pub departure_enabled: bool,
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub departure_time: DateTime<Utc>,
    pub service_id: String,
    pub stop_headsign: String,
    pub trip_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleFrequency {
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub end_time: DateTime<Utc>,
    pub headway_secs: i64,
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub service_date: DateTime<Utc>,
    pub service_id: String,
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub start_time: DateTime<Utc>,
    pub trip_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopRouteDirectionSchedule {
    pub schedule_frequencies: Vec<ScheduleFrequency>,
    pub schedule_stop_times: Vec<ScheduleStopTime>,
    pub trip_headsign: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StopRouteSchedule {
    #[serde(rename = "routeId", serialize_with = "serialize_id")]
    pub route: Arc<Route>,
    pub stop_route_direction_schedules: Vec<StopRouteDirectionSchedule>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StopCalendarDay {
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub date: DateTime<Utc>,
    pub group: i32,
}

/// Timetable of a stop for one service day, grouped by route then direction
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StopSchedule {
    #[serde(serialize_with = "serialize_millis")]
    pub date: DateTime<Utc>,
    pub stop_calendar_days: Vec<StopCalendarDay>,
    pub stop_id: String,
    pub stop_route_schedules: Vec<StopRouteSchedule>,
    pub time_zone: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StopGroupName {
    pub name: String,
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub name_type: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StopGroup {
    pub id: String,
    pub name: StopGroupName,
    pub polylines: Vec<EncodedPolyline>,
    #[serde(rename = "stopIds", serialize_with = "serialize_ids")]
    pub stops: Vec<Arc<Stop>>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StopGrouping {
    pub ordered: bool,
    pub stop_groups: Vec<StopGroup>,
    #[serde(rename = "type")]
    pub grouping_type: String,
}

/// Stops served by a route, with their grouping by direction
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StopsForRoute {
    pub polylines: Vec<EncodedPolyline>,
    pub route_id: String,
    pub stop_groupings: Vec<StopGrouping>,
    #[serde(rename = "stopIds", serialize_with = "serialize_ids")]
    pub stops: Vec<Arc<Stop>>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatus {
    #[serde(serialize_with = "serialize_optional_millis")]
    pub last_location_update_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_optional_millis")]
    pub last_update_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Same values as [TripStatus::phase]
    pub phase: String,
    pub status: String,
    /// Zero-value trip when the vehicle is not serving a trip in the references
    #[serde(rename = "tripId", serialize_with = "serialize_id")]
    pub trip: Arc<Trip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_status: Option<TripStatus>,
    pub vehicle_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TripStopTime {
    /// Seconds since the start of the service day
    pub arrival_time: i64,
    pub departure_time: i64,
    pub distance_along_trip: f64,
    pub stop_headsign: String,
    pub stop_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TripSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Next trip of the block, empty for the last one
    pub next_trip_id: String,
    pub previous_trip_id: String,
    pub stop_times: Vec<TripStopTime>,
    pub time_zone: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<TripSchedule>,
    #[serde(serialize_with = "serialize_millis")]
    pub service_date: DateTime<Utc>,
    #[serde(rename = "situationIds", serialize_with = "serialize_ids")]
    pub situations: Vec<Arc<Situation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TripStatus>,
    /// Zero-value trip when the trip is not in the references
    #[serde(rename = "tripId", serialize_with = "serialize_id")]
    pub trip: Arc<Trip>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentTime {
    pub readable_time: String,
    #[serde(
        deserialize_with = "deserialize_millis",
        serialize_with = "serialize_millis"
    )]
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisteredAlarm {
    pub alarm_id: String,
}

/// Items of a list method, with the flags the server sets on the list
///
/// Derefs to the slice of items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Listing<T> {
    /// Items in the order of the response
    pub list: Vec<T>,
    /// More results matched than the server returned
    pub limit_exceeded: bool,
    /// The searched location is outside the area covered by the server
    pub out_of_range: bool,
}

impl<T> std::ops::Deref for Listing<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        &self.list
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}
