//! Conversion of the wire records into objects, resolving the ids they contain
//!
//! Every function is pure: the same record with the same references gives the same object.
use crate::objects::*;
use crate::records::*;
use crate::references::{lookup, lookup_all, References, ResolutionPolicy};
use crate::Error;
use std::sync::Arc;

pub fn route(
    record: RouteRecord,
    agencies: &[Arc<Agency>],
    policy: ResolutionPolicy,
) -> Result<Route, Error> {
    Ok(Route {
        agency: lookup(agencies, &record.agency_id, policy)?,
        agency_id: record.agency_id,
        color: record.color,
        description: record.description,
        id: record.id,
        long_name: record.long_name,
        short_name: record.short_name,
        text_color: record.text_color,
        route_type: record.route_type,
        url: record.url,
    })
}

pub fn stop(
    record: StopRecord,
    routes: &[Arc<Route>],
    policy: ResolutionPolicy,
) -> Result<Stop, Error> {
    Ok(Stop {
        routes: lookup_all(routes, &record.route_ids, policy)?,
        code: record.code,
        direction: record.direction,
        id: record.id,
        lat: record.lat,
        location_type: record.location_type,
        lon: record.lon,
        name: record.name,
        parent: record.parent,
        wheelchair_boarding: record.wheelchair_boarding,
    })
}

pub fn agency_with_coverage(
    record: AgencyWithCoverageRecord,
    refs: &References,
) -> Result<AgencyWithCoverage, Error> {
    Ok(AgencyWithCoverage {
        agency: refs.agency(&record.agency_id)?,
        lat: record.lat,
        lat_span: record.lat_span,
        lon: record.lon,
        lon_span: record.lon_span,
    })
}

pub fn trip_status(record: TripStatusRecord, refs: &References) -> Result<TripStatus, Error> {
    Ok(TripStatus {
        closest_stop: refs.stop(&record.closest_stop)?,
        next_stop: refs.stop(&record.next_stop)?,
        situations: refs.situations(&record.situation_ids)?,
        active_trip_id: record.active_trip_id,
        block_trip_sequence: record.block_trip_sequence,
        closest_stop_time_offset: record.closest_stop_time_offset,
        distance_along_trip: record.distance_along_trip,
        frequency: record.frequency,
        last_known_distance_along_trip: record.last_known_distance_along_trip,
        last_known_location: record.last_known_location,
        last_known_orientation: record.last_known_orientation,
        last_location_update_time: record.last_location_update_time,
        last_update_time: record.last_update_time,
        next_stop_time_offset: record.next_stop_time_offset,
        orientation: record.orientation,
        phase: record.phase,
        position: record.position,
        predicted: record.predicted,
        schedule_deviation: record.schedule_deviation,
        scheduled_distance_along_trip: record.scheduled_distance_along_trip,
        service_date: record.service_date,
        status: record.status,
        total_distance_along_trip: record.total_distance_along_trip,
        vehicle_id: record.vehicle_id,
    })
}

fn optional_trip_status(
    record: Option<TripStatusRecord>,
    refs: &References,
) -> Result<Option<TripStatus>, Error> {
    record.map(|s| trip_status(s, refs)).transpose()
}

pub fn arrival_and_departure(
    record: ArrivalAndDepartureRecord,
    refs: &References,
) -> Result<ArrivalAndDeparture, Error> {
    Ok(ArrivalAndDeparture {
        situations: refs.situations(&record.situation_ids)?,
        trip_status: optional_trip_status(record.trip_status, refs)?,
        arrival_enabled: record.arrival_enabled,
        block_trip_sequence: record.block_trip_sequence,
        departure_enabled: record.departure_enabled,
        distance_from_stop: record.distance_from_stop,
        frequency: record.frequency,
        last_update_time: record.last_update_time,
        number_of_stops_away: record.number_of_stops_away,
        predicted: record.predicted,
        predicted_arrival_time: record.predicted_arrival_time,
        predicted_departure_time: record.predicted_departure_time,
        route_id: record.route_id,
        route_long_name: record.route_long_name,
        route_short_name: record.route_short_name,
        scheduled_arrival_time: record.scheduled_arrival_time,
        scheduled_departure_time: record.scheduled_departure_time,
        service_date: record.service_date,
        status: record.status,
        stop_id: record.stop_id,
        stop_sequence: record.stop_sequence,
        total_stops_in_trip: record.total_stops_in_trip,
        trip_headsign: record.trip_headsign,
        trip_id: record.trip_id,
        vehicle_id: record.vehicle_id,
    })
}

pub fn stop_with_arrivals_and_departures(
    record: StopWithArrivalsAndDeparturesRecord,
    refs: &References,
) -> Result<StopWithArrivalsAndDepartures, Error> {
    Ok(StopWithArrivalsAndDepartures {
        arrivals_and_departures: record
            .arrivals_and_departures
            .into_iter()
            .map(|a| arrival_and_departure(a, refs))
            .collect::<Result<_, _>>()?,
        nearby_stops: refs.stops(&record.nearby_stop_ids)?,
        situations: refs.situations(&record.situation_ids)?,
        stop: refs.stop(&record.stop_id)?,
    })
}

pub fn stop_schedule(
    record: StopScheduleRecord,
    refs: &References,
) -> Result<StopSchedule, Error> {
    let stop_route_schedules = record
        .stop_route_schedules
        .into_iter()
        .map(|s| {
            Ok(StopRouteSchedule {
                route: refs.route(&s.route_id)?,
                stop_route_direction_schedules: s.stop_route_direction_schedules,
            })
        })
        .collect::<Result<_, Error>>()?;

    Ok(StopSchedule {
        date: record.date,
        stop_calendar_days: record.stop_calendar_days,
        stop_id: record.stop_id,
        stop_route_schedules,
        time_zone: record.time_zone,
    })
}

/// The stops of each group are taken from the stops of the route, not from all the references
pub fn stops_for_route(
    record: StopsForRouteRecord,
    refs: &References,
) -> Result<StopsForRoute, Error> {
    let stops = refs.stops(&record.stop_ids)?;
    let stop_groupings = record
        .stop_groupings
        .into_iter()
        .map(|grouping| {
            let stop_groups = grouping
                .stop_groups
                .into_iter()
                .map(|group| {
                    Ok(StopGroup {
                        stops: lookup_all(&stops, &group.stop_ids, refs.policy)?,
                        id: group.id,
                        name: group.name,
                        polylines: group.polylines,
                    })
                })
                .collect::<Result<_, Error>>()?;
            Ok(StopGrouping {
                ordered: grouping.ordered,
                stop_groups,
                grouping_type: grouping.grouping_type,
            })
        })
        .collect::<Result<_, Error>>()?;

    Ok(StopsForRoute {
        polylines: record.polylines,
        route_id: record.route_id,
        stop_groupings,
        stops,
    })
}

pub fn vehicle_status(
    record: VehicleStatusRecord,
    refs: &References,
) -> Result<VehicleStatus, Error> {
    Ok(VehicleStatus {
        trip: refs.trip(&record.trip_id)?,
        trip_status: optional_trip_status(record.trip_status, refs)?,
        last_location_update_time: record.last_location_update_time,
        last_update_time: record.last_update_time,
        location: record.location,
        phase: record.phase,
        status: record.status,
        vehicle_id: record.vehicle_id,
    })
}

pub fn trip_details(record: TripDetailsRecord, refs: &References) -> Result<TripDetails, Error> {
    Ok(TripDetails {
        trip: refs.trip(&record.trip_id)?,
        status: optional_trip_status(record.status, refs)?,
        situations: refs.situations(&record.situation_ids)?,
        frequency: record.frequency,
        schedule: record.schedule,
        service_date: record.service_date,
    })
}
