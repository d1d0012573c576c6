use crate::objects::*;
use crate::{Bytes, Client, Error, Params, ResolutionPolicy, StatusCode, Transport, TransportError};
use pretty_assertions::assert_eq;
use rgb::RGB8;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const BASE_URL: &str = "http://localhost:8080/api/where";

/// Answers with `fixtures/<method>.json`, the method being the first segment of the path
#[derive(Debug, Default)]
struct FixtureTransport {
    fixtures: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FixtureTransport {
    fn with(mut self, method: &str, fixture: &str) -> Self {
        self.fixtures.insert(method.to_owned(), fixture.to_owned());
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FixtureTransport {
    fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        self.requests.lock().unwrap().push(url.to_owned());
        let path = url.trim_start_matches(BASE_URL).trim_start_matches('/');
        let method = path.split(|c: char| c == '/' || c == '.').next().unwrap_or_default();
        let fixture = match self.fixtures.get(method) {
            Some(fixture) => fixture.clone(),
            None => method.replace('-', "_"),
        };
        Ok(Bytes::from(std::fs::read(format!("fixtures/{}.json", fixture))?))
    }
}

fn client() -> Client<FixtureTransport> {
    Client::new(BASE_URL, "TEST", FixtureTransport::default())
}

fn fixture(name: &str) -> Value {
    let content = std::fs::read(format!("fixtures/{}.json", name)).expect("impossible to read fixture");
    serde_json::from_slice(&content).expect("invalid fixture")
}

fn params(values: &[(&str, &str)]) -> Params {
    values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Drops the nulls and reads every number as a float, ints and floats being the same on the wire
fn normalized(value: Value) -> Value {
    match value {
        Value::Number(n) => n.as_f64().map(Value::from).unwrap_or(Value::Number(n)),
        Value::Array(a) => Value::Array(a.into_iter().map(normalized).collect()),
        Value::Object(o) => Value::Object(
            o.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, normalized(v)))
                .collect(),
        ),
        v => v,
    }
}

fn assert_round_trip<T: Serialize>(wire: &Value, object: &T) {
    assert_eq!(
        normalized(wire.clone()),
        normalized(serde_json::to_value(object).unwrap())
    );
}

#[test]
fn read_agency() {
    let client = client();
    let agency = client.agency("1").unwrap();
    assert_eq!("1", agency.id);
    assert_eq!("Metro Transit", agency.name);
    assert_eq!("America/Los_Angeles", agency.timezone);
    assert_round_trip(&fixture("agency")["data"]["entry"], &agency);
    assert_eq!(
        vec![format!("{}/agency/1.json?key=TEST", BASE_URL)],
        client.transport().requests()
    );
}

#[test]
fn read_route() {
    let route = client().route("1_100").unwrap();
    assert_eq!("Metro Transit", route.agency.name);
    assert_eq!(RouteType::Bus, route.route_type);
    assert_eq!(Some(RGB8::new(10, 110, 180)), route.color);
    assert_eq!(Some(RGB8::new(255, 255, 255)), route.text_color);
    assert_eq!("Downtown Seattle - Capitol Hill", format!("{}", route));
    assert_round_trip(&fixture("route")["data"]["entry"], &route);
}

#[test]
fn route_with_unresolved_agency() {
    let transport = FixtureTransport::default().with("route", "route_missing_agency");
    let route = Client::new(BASE_URL, "TEST", transport).route("99_31").unwrap();
    assert_eq!("99_31", route.id);
    assert_eq!("31", route.short_name);
    assert_eq!(Agency::default(), *route.agency);
    assert_eq!("99", route.agency_id);
    assert_round_trip(&fixture("route_missing_agency")["data"]["entry"], &route);
}

#[test]
fn strict_route_with_unresolved_agency() {
    let transport = FixtureTransport::default().with("route", "route_missing_agency");
    let client = Client::new(BASE_URL, "TEST", transport).with_policy(ResolutionPolicy::Strict);
    match client.route("99_31") {
        Err(Error::Reference { object_type, id }) => {
            assert_eq!(ObjectType::Agency, object_type);
            assert_eq!("99", id);
        }
        r => panic!("unexpected result {:?}", r),
    }
}

#[test]
fn read_stop() {
    let stop = client()
        .with_policy(ResolutionPolicy::Strict)
        .stop("1_75403")
        .unwrap();
    assert_eq!("Stevens Way & Benton Ln", stop.name);
    assert_eq!(LocationType::StopPoint, stop.location_type);
    assert_eq!(WheelchairBoarding::Unknown, stop.wheelchair_boarding);
    assert_eq!(47.6543655, stop.location().lat);
    let route_ids: Vec<&str> = stop.routes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(vec!["1_31", "1_100"], route_ids);
    assert_eq!("Metro Transit", stop.routes[0].agency.name);
    // both routes share the same resolved agency
    assert!(Arc::ptr_eq(&stop.routes[0].agency, &stop.routes[1].agency));
    assert_round_trip(&fixture("stop")["data"]["entry"], &stop);
}

#[test]
fn read_trip() {
    let trip = client().trip("1_604670535").unwrap();
    assert_eq!("University District", trip.trip_headsign);
    assert_eq!("1_4237393", trip.block_id);
    assert_round_trip(&fixture("trip")["data"]["entry"], &trip);
}

#[test]
fn read_arrivals_and_departures() {
    let client = client();
    let arrivals = client
        .arrivals_and_departures_for_stop("1_75403", &params(&[("minutesBefore", "5")]))
        .unwrap();
    let wire = fixture("arrivals_and_departures_for_stop");
    assert_round_trip(&wire["data"]["entry"], &arrivals);
    assert_eq!(
        vec![format!(
            "{}/arrivals-and-departures-for-stop/1_75403.json?key=TEST&minutesBefore=5",
            BASE_URL
        )],
        client.transport().requests()
    );

    assert_eq!("Stevens Way & Benton Ln", arrivals.stop.name);
    assert_eq!(1, arrivals.nearby_stops.len());
    assert!(arrivals.situations.is_empty());

    let predicted = &arrivals.arrivals_and_departures[0];
    assert_eq!(Some(true), predicted.arrival_enabled);
    assert_eq!(1_270_614_900, predicted.best_arrival_time().timestamp());
    assert_eq!("Stevens Way detour", format!("{}", predicted.situations[0]));
    assert_round_trip(
        &wire["data"]["references"]["situations"][0],
        &predicted.situations[0],
    );

    let status = predicted.trip_status.as_ref().unwrap();
    assert_eq!("Stevens Way & Pend Oreille Rd", status.next_stop.name);
    assert_eq!(120, status.schedule_deviation);
    assert!(Arc::ptr_eq(&arrivals.stop, &status.closest_stop));
    assert!(status.situations[0].is_active(status.last_update_time.unwrap()));

    let scheduled = &arrivals.arrivals_and_departures[1];
    assert_eq!(None, scheduled.arrival_enabled);
    assert_eq!(Some(false), scheduled.departure_enabled);
    assert_eq!(None, scheduled.predicted_arrival_time);
    assert_eq!(None, scheduled.trip_status);
    assert_eq!(scheduled.scheduled_arrival_time, scheduled.best_arrival_time());
}

#[test]
fn read_arrival_and_departure() {
    let arrival = client()
        .arrival_and_departure_for_stop(
            "1_75403",
            &params(&[("tripId", "1_604670535"), ("serviceDate", "1270537200000")]),
        )
        .unwrap();
    assert_eq!("1_604670535", arrival.trip_id);
    assert_round_trip(
        &fixture("arrival_and_departure_for_stop")["data"]["entry"],
        &arrival,
    );
}

#[test]
fn read_block() {
    let block = client().block("1_4237393").unwrap();
    assert_eq!(
        vec!["1_604670535", "1_604670600"],
        block.trip_ids().collect::<Vec<_>>()
    );
    let stop_time = &block.configurations[0].trips[1].block_stop_times[0].stop_time;
    assert_eq!(PickupDropOffType::NotAvailable, stop_time.drop_off_type);
    assert_eq!(58260, stop_time.departure_time);
    assert_round_trip(&fixture("block")["data"]["entry"], &block);
}

#[test]
fn read_shape() {
    let shape = client().shape("1_20031002").unwrap();
    assert_eq!(3, shape.length);
    let points = shape.decode().unwrap();
    assert_eq!(3, points.len());
    assert_eq!(Location { lat: 38.5, lon: -120.2 }, points[0]);
    assert_round_trip(&fixture("shape")["data"]["entry"], &shape);
}

#[test]
fn read_schedule() {
    let schedule = client()
        .schedule_for_stop("1_75403", &params(&[("date", "2010-04-06")]))
        .unwrap();
    assert_eq!("America/Los_Angeles", schedule.time_zone);
    let route_schedule = &schedule.stop_route_schedules[0];
    assert_eq!("31", route_schedule.route.short_name);
    assert_eq!("Metro Transit", route_schedule.route.agency.name);
    let stop_times = &route_schedule.stop_route_direction_schedules[0].schedule_stop_times;
    assert_eq!(2, stop_times.len());
    assert!(!stop_times[1].departure_enabled);
    assert_round_trip(&fixture("schedule_for_stop")["data"]["entry"], &schedule);
}

#[test]
fn read_stops_for_route() {
    let stops_for_route = client()
        .stops_for_route("1_31", &params(&[("includePolylines", "true")]))
        .unwrap();
    assert_eq!(2, stops_for_route.stops.len());
    let groups = &stops_for_route.stop_groupings[0].stop_groups;
    assert_eq!("University District", groups[0].name.name);
    assert_eq!(2, groups[0].stops.len());
    assert!(Arc::ptr_eq(&groups[1].stops[0], &stops_for_route.stops[1]));
    assert_round_trip(&fixture("stops_for_route")["data"]["entry"], &stops_for_route);
}

#[test]
fn read_vehicles() {
    let vehicles = client()
        .vehicles_for_agency("1", &Params::new())
        .unwrap();
    assert!(!vehicles.limit_exceeded);
    assert_eq!(2, vehicles.len());

    assert_eq!("University District", vehicles[0].trip.trip_headsign);
    assert_eq!(
        Some(Location {
            lat: 47.6541,
            lon: -122.3049
        }),
        vehicles[0].location
    );
    // a vehicle in layover does not serve any trip
    assert_eq!(Trip::default(), *vehicles[1].trip);
    assert_eq!(None, vehicles[1].last_location_update_time);
    assert_eq!(None, vehicles[1].trip_status);

    let wire = fixture("vehicles_for_agency");
    for (i, vehicle) in vehicles.iter().enumerate() {
        assert_round_trip(&wire["data"]["list"][i], vehicle);
    }
}

#[test]
fn read_trip_details() {
    let details = client()
        .trip_details("1_604670535", &params(&[("includeSchedule", "true")]))
        .unwrap();
    assert_eq!("1_31", details.trip.route_id);
    let schedule = details.schedule.as_ref().unwrap();
    assert_eq!("1_604670600", schedule.next_trip_id);
    assert_eq!(2, schedule.stop_times.len());
    let status = details.status.as_ref().unwrap();
    assert_eq!("Stevens Way & Benton Ln", status.closest_stop.name);
    assert_eq!("1_1276287", details.situations[0].id);
    assert_round_trip(&fixture("trip_details")["data"]["entry"], &details);
}

#[test]
fn trip_for_vehicle_without_trip() {
    let details = client().trip_for_vehicle("1_4210", &Params::new()).unwrap();
    assert_eq!(Trip::default(), *details.trip);
    assert_eq!(
        "1_604670600",
        details.status.as_ref().unwrap().active_trip_id
    );

    let strict = client().with_policy(ResolutionPolicy::Strict);
    match strict.trip_for_vehicle("1_4210", &Params::new()) {
        Err(Error::Reference { object_type, id }) => {
            assert_eq!(ObjectType::Trip, object_type);
            assert_eq!("1_604670600", id);
        }
        r => panic!("unexpected result {:?}", r),
    }
}

#[test]
fn read_trips_for_route() {
    let trips = client()
        .trips_for_route("1_31", &params(&[("includeStatus", "true")]))
        .unwrap();
    assert!(trips.limit_exceeded);
    assert_eq!(1, trips.len());
    assert_eq!(None, trips[0].schedule);
    assert_round_trip(&fixture("trips_for_route")["data"]["list"][0], &trips[0]);
}

#[test]
fn read_routes_for_location() {
    let client = client();
    let routes = client
        .routes_for_location(&params(&[
            ("lat", "47.653435"),
            ("lon", "-122.305641"),
            ("key", "OVERRIDE"),
        ]))
        .unwrap();
    assert!(routes.limit_exceeded);
    assert!(!routes.out_of_range);
    let short_names: Vec<&str> = routes.iter().map(|r| r.short_name.as_str()).collect();
    assert_eq!(vec!["31", "100"], short_names);
    let wire = fixture("routes_for_location");
    for (i, route) in routes.iter().enumerate() {
        assert_round_trip(&wire["data"]["list"][i], route);
    }
    // the api key of the client always wins
    assert_eq!(
        vec![format!(
            "{}/routes-for-location.json?key=TEST&lat=47.653435&lon=-122.305641",
            BASE_URL
        )],
        client.transport().requests()
    );
}

#[test]
fn read_routes_for_agency() {
    let routes = client().routes_for_agency("1").unwrap();
    let wire = fixture("routes_for_agency");
    assert_eq!(2, routes.len());
    for (i, route) in routes.iter().enumerate() {
        assert_round_trip(&wire["data"]["list"][i], route);
    }
}

#[test]
fn read_stops_for_location() {
    let stops = client()
        .stops_for_location(&params(&[("lat", "47.653"), ("lon", "-122.307"), ("radius", "1000")]))
        .unwrap();
    assert!(stops.out_of_range);
    assert_eq!(2, stops.len());
    assert_eq!(WheelchairBoarding::Accessible, stops[1].wheelchair_boarding);
    assert_eq!(1, stops[1].routes.len());
    let wire = fixture("stops_for_location");
    for (i, stop) in stops.iter().enumerate() {
        assert_round_trip(&wire["data"]["list"][i], stop);
    }
}

#[test]
fn read_trips_for_location() {
    let client = client();
    let trips = client
        .trips_for_location(&params(&[
            ("lat", "47.653"),
            ("lon", "-122.307"),
            ("latSpan", "0.01"),
            ("lonSpan", "0.01"),
        ]))
        .unwrap();
    assert!(!trips.limit_exceeded);
    assert_eq!(1, trips.len());
    assert_eq!("University District", trips[0].trip.trip_headsign);
    assert_round_trip(&fixture("trips_for_location")["data"]["list"][0], &trips[0]);
    assert_eq!(
        vec![format!(
            "{}/trips-for-location.json?key=TEST&lat=47.653&latSpan=0.01&lon=-122.307&lonSpan=0.01",
            BASE_URL
        )],
        client.transport().requests()
    );
}

#[test]
fn read_agencies_with_coverage() {
    let agencies = client().agencies_with_coverage().unwrap();
    assert_eq!(1, agencies.len());
    assert_eq!("Metro Transit", agencies[0].agency.name);
    assert_round_trip(
        &fixture("agencies_with_coverage")["data"]["list"][0],
        &agencies[0],
    );
}

#[test]
fn read_ids_for_agency() {
    let client = client();
    assert_eq!(
        vec!["1_31".to_owned(), "1_100".to_owned()],
        client.route_ids_for_agency("1").unwrap()
    );
    assert_eq!(
        vec!["1_75403".to_owned(), "1_75414".to_owned()],
        client.stop_ids_for_agency("1").unwrap()
    );
    assert_eq!(
        vec![
            format!("{}/route-ids-for-agency/1.json?key=TEST", BASE_URL),
            format!("{}/stop-ids-for-agency/1.json?key=TEST", BASE_URL),
        ],
        client.transport().requests()
    );
}

#[test]
fn read_current_time() {
    let time = client().current_time().unwrap();
    assert_eq!(1_270_614_730_908, time.time.timestamp_millis());
    assert_eq!("2010-04-07T04:32:10.908Z", time.readable_time);
}

#[test]
fn alarms() {
    let client = client().with_policy(ResolutionPolicy::Strict);
    let alarm = client
        .register_alarm_for_arrival_and_departure_at_stop(
            "1_75403",
            &params(&[
                ("tripId", "1_604670535"),
                ("serviceDate", "1270537200000"),
                ("stopSequence", "22"),
                ("alarmTimeOffset", "120"),
                ("url", "http://localhost/alarm?id=#ALARM_ID#"),
            ]),
        )
        .unwrap();
    assert_eq!("1_7deb8f2b", alarm.alarm_id);

    let transport = FixtureTransport::default().with("cancel-alarm", "ok");
    Client::new(BASE_URL, "TEST", transport)
        .cancel_alarm(&alarm.alarm_id)
        .unwrap();

    assert_eq!(
        format!(
            "{}/register-alarm-for-arrival-and-departure-at-stop/1_75403.json?key=TEST\
             &alarmTimeOffset=120&serviceDate=1270537200000&stopSequence=22&tripId=1_604670535\
             &url=http%3A%2F%2Flocalhost%2Falarm%3Fid%3D%23ALARM_ID%23",
            BASE_URL
        ),
        client.transport().requests()[0]
    );
}

#[test]
fn failed_actions() {
    let transport = FixtureTransport::default()
        .with("cancel-alarm", "not_found")
        .with("report-problem-with-stop", "not_found")
        .with("report-problem-with-trip", "not_found");
    let client = Client::new(BASE_URL, "TEST", transport);
    let results = vec![
        client.cancel_alarm("1_7deb8f2b"),
        client.report_problem_with_stop("1_75403", &Params::new()),
        client.report_problem_with_trip("1_604670535", &Params::new()),
    ];
    for result in results {
        match result {
            Err(Error::Api { code, text }) => {
                assert_eq!(404, code);
                assert_eq!("resource not found", text);
            }
            r => panic!("unexpected result {:?}", r),
        }
    }
}

#[test]
fn report_problems() {
    let transport = FixtureTransport::default()
        .with("report-problem-with-stop", "ok")
        .with("report-problem-with-trip", "ok");
    let client = Client::new(BASE_URL, "TEST", transport);
    client
        .report_problem_with_stop(
            "1_75403",
            &params(&[("code", "stop_name_wrong"), ("userComment", "wrong name")]),
        )
        .unwrap();
    client
        .report_problem_with_trip("1_604670535", &params(&[("code", "vehicle_never_came")]))
        .unwrap();
    assert_eq!(
        vec![
            format!(
                "{}/report-problem-with-stop/1_75403.json?key=TEST&code=stop_name_wrong&userComment=wrong%20name",
                BASE_URL
            ),
            format!(
                "{}/report-problem-with-trip/1_604670535.json?key=TEST&code=vehicle_never_came",
                BASE_URL
            ),
        ],
        client.transport().requests()
    );
}

#[test]
fn not_found() {
    let transport = FixtureTransport::default().with("stop", "not_found");
    let err = Client::new(BASE_URL, "TEST", transport)
        .stop("1_0")
        .unwrap_err();
    assert_eq!(Some(StatusCode::NotFound), err.status());
    match err {
        Error::Api { code, text } => {
            assert_eq!(404, code);
            assert_eq!("resource not found", text);
        }
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn success_without_entry() {
    let transport = FixtureTransport::default().with("agency", "ok");
    let err = Client::new(BASE_URL, "TEST", transport)
        .agency("1")
        .unwrap_err();
    assert!(matches!(err, Error::MissingPayload(crate::Shape::Entry)));
}

#[test]
fn unreachable_server() {
    let transport = |_: &str| -> Result<Bytes, TransportError> { Err("connection refused".into()) };
    let err = Client::new(BASE_URL, "SECRET", transport)
        .agency("1")
        .unwrap_err();
    match &err {
        Error::Transport { url, source } => {
            assert_eq!(format!("{}/agency/1.json?key=%3Credacted%3E", BASE_URL), *url);
            assert_eq!("connection refused", source.to_string());
        }
        e => panic!("unexpected error {:?}", e),
    }
    assert!(!err.to_string().contains("SECRET"));
}

#[test]
fn invalid_body() {
    let transport = |_: &str| -> Result<Bytes, TransportError> {
        Ok(Bytes::from_static(b"<html><body>502 Bad Gateway</body></html>"))
    };
    let err = Client::new(BASE_URL, "TEST", transport)
        .trip("1_604670535")
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn url_building() {
    let client = Client::new("http://localhost:8080/api/where/", "a key", |_: &str| {
        Ok::<Bytes, TransportError>(Bytes::new())
    });
    assert_eq!(
        "http://localhost:8080/api/where/current-time.json?key=a%20key",
        client.url("current-time", None, &Params::new())
    );
    assert_eq!(
        "http://localhost:8080/api/where/stop/1_75403%2F2.json?key=a%20key&time=1270614730908",
        client.url(
            "stop",
            Some("1_75403/2"),
            &params(&[("time", "1270614730908")])
        )
    );
}
