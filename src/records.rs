//! Wire shapes of the records that point to other objects by id
//!
//! Objects without references ([Agency], [Trip], [Situation], [crate::Block]...) are
//! decoded directly into their final type. The records below still hold raw ids and
//! are turned into objects by [crate::normalize] once the references are resolved.
use crate::objects::*;
use crate::serde_helpers::*;
use chrono::{DateTime, Utc};
use rgb::RGB8;

/// The `data.references` section of a response
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ReferenceBundle {
    pub agencies: Vec<Agency>,
    pub routes: Vec<RouteRecord>,
    pub situations: Vec<Situation>,
    pub stops: Vec<StopRecord>,
    pub trips: Vec<Trip>,
}

impl ReferenceBundle {
    pub fn is_empty(&self) -> bool {
        self.agencies.is_empty()
            && self.routes.is_empty()
            && self.situations.is_empty()
            && self.stops.is_empty()
            && self.trips.is_empty()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AgencyWithCoverageRecord {
    pub agency_id: String,
    pub lat: f64,
    pub lat_span: f64,
    pub lon: f64,
    pub lon_span: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteRecord {
    pub agency_id: String,
    #[serde(deserialize_with = "deserialize_color")]
    pub color: Option<RGB8>,
    #[serde(deserialize_with = "de_with_empty_default")]
    pub description: String,
    pub id: String,
    pub long_name: String,
    pub short_name: String,
    #[serde(deserialize_with = "deserialize_color")]
    pub text_color: Option<RGB8>,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    #[serde(deserialize_with = "de_with_empty_default")]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopRecord {
    pub code: String,
    pub direction: String,
    pub id: String,
    pub lat: f64,
    pub location_type: LocationType,
    pub lon: f64,
    pub name: String,
    #[serde(deserialize_with = "de_with_empty_default")]
    pub parent: String,
    pub route_ids: Vec<String>,
    pub wheelchair_boarding: WheelchairBoarding,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TripStatusRecord {
    pub active_trip_id: String,
    pub block_trip_sequence: i32,
    pub closest_stop: String,
    pub closest_stop_time_offset: i64,
    pub distance_along_trip: f64,
    pub frequency: Option<Frequency>,
    pub last_known_distance_along_trip: f64,
    pub last_known_location: Option<Location>,
    pub last_known_orientation: f64,
    #[serde(deserialize_with = "deserialize_optional_millis")]
    pub last_location_update_time: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_optional_millis")]
    pub last_update_time: Option<DateTime<Utc>>,
    pub next_stop: String,
    pub next_stop_time_offset: i64,
    pub orientation: f64,
    pub phase: String,
    pub position: Location,
    pub predicted: bool,
    pub schedule_deviation: i64,
    pub scheduled_distance_along_trip: f64,
    #[serde(deserialize_with = "deserialize_millis")]
    pub service_date: DateTime<Utc>,
    pub situation_ids: Vec<String>,
    pub status: String,
    pub total_distance_along_trip: f64,
    pub vehicle_id: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrivalAndDepartureRecord {
    pub arrival_enabled: Option<bool>,
    pub block_trip_sequence: i32,
    pub departure_enabled: Option<bool>,
    pub distance_from_stop: f64,
    pub frequency: Option<Frequency>,
    #[serde(deserialize_with = "deserialize_optional_millis")]
    pub last_update_time: Option<DateTime<Utc>>,
    pub number_of_stops_away: i32,
    pub predicted: bool,
    #[serde(deserialize_with = "deserialize_optional_millis")]
    pub predicted_arrival_time: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_optional_millis")]
    pub predicted_departure_time: Option<DateTime<Utc>>,
    pub route_id: String,
    pub route_long_name: String,
    pub route_short_name: String,
    #[serde(deserialize_with = "deserialize_millis")]
    pub scheduled_arrival_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_millis")]
    pub scheduled_departure_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_millis")]
    pub service_date: DateTime<Utc>,
    pub situation_ids: Vec<String>,
    pub status: String,
    pub stop_id: String,
    pub stop_sequence: i32,
    pub total_stops_in_trip: i32,
    pub trip_headsign: String,
    pub trip_id: String,
    pub trip_status: Option<TripStatusRecord>,
    pub vehicle_id: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopWithArrivalsAndDeparturesRecord {
    pub arrivals_and_departures: Vec<ArrivalAndDepartureRecord>,
    pub nearby_stop_ids: Vec<String>,
    pub situation_ids: Vec<String>,
    pub stop_id: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopRouteScheduleRecord {
    pub route_id: String,
    pub stop_route_direction_schedules: Vec<StopRouteDirectionSchedule>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopScheduleRecord {
    #[serde(deserialize_with = "deserialize_millis")]
    pub date: DateTime<Utc>,
    pub stop_calendar_days: Vec<StopCalendarDay>,
    pub stop_id: String,
    pub stop_route_schedules: Vec<StopRouteScheduleRecord>,
    pub time_zone: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopGroupRecord {
    pub id: String,
    pub name: StopGroupName,
    pub polylines: Vec<EncodedPolyline>,
    pub stop_ids: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopGroupingRecord {
    pub ordered: bool,
    pub stop_groups: Vec<StopGroupRecord>,
    #[serde(rename = "type")]
    pub grouping_type: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StopsForRouteRecord {
    pub polylines: Vec<EncodedPolyline>,
    pub route_id: String,
    pub stop_groupings: Vec<StopGroupingRecord>,
    pub stop_ids: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleStatusRecord {
    #[serde(deserialize_with = "deserialize_optional_millis")]
    pub last_location_update_time: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_optional_millis")]
    pub last_update_time: Option<DateTime<Utc>>,
    pub location: Option<Location>,
    pub phase: String,
    pub status: String,
    pub trip_id: String,
    pub trip_status: Option<TripStatusRecord>,
    pub vehicle_id: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TripDetailsRecord {
    pub frequency: Option<Frequency>,
    pub schedule: Option<TripSchedule>,
    #[serde(deserialize_with = "deserialize_millis")]
    pub service_date: DateTime<Utc>,
    pub situation_ids: Vec<String>,
    pub status: Option<TripStatusRecord>,
    pub trip_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_booleans() {
        let absent: ArrivalAndDepartureRecord =
            serde_json::from_str(r#"{"routeId": "1_31", "serviceDate": 1270537200000}"#).unwrap();
        assert_eq!(None, absent.arrival_enabled);
        assert_eq!(None, absent.departure_enabled);

        let disabled: ArrivalAndDepartureRecord = serde_json::from_str(
            r#"{"arrivalEnabled": false, "departureEnabled": true, "serviceDate": 1270537200000}"#,
        )
        .unwrap();
        assert_eq!(Some(false), disabled.arrival_enabled);
        assert_eq!(Some(true), disabled.departure_enabled);
    }

    #[test]
    fn null_strings() {
        let route: RouteRecord = serde_json::from_str(
            r#"{"id": "1_31", "agencyId": "1", "description": null, "url": null, "color": null, "type": 3}"#,
        )
        .unwrap();
        assert_eq!("", route.description);
        assert_eq!("", route.url);
        assert_eq!(None, route.color);
        assert_eq!(RouteType::Bus, route.route_type);
    }

    #[test]
    fn empty_lists_stay_empty() {
        let stop: StopRecord = serde_json::from_str(r#"{"id": "1_75403", "routeIds": []}"#).unwrap();
        assert!(stop.route_ids.is_empty());
        assert_eq!(LocationType::StopPoint, stop.location_type);
        assert_eq!(WheelchairBoarding::Unknown, stop.wheelchair_boarding);
    }
}
