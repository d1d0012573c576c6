//! One method per OneBusAway API operation
//!
//! Each call builds `{base_url}/{method}[/{id}].json?key={api_key}&...`, fetches it through the
//! [Transport], decodes the envelope and turns the records into objects with their references
//! resolved. Nothing is kept between two calls.
use crate::envelope::{self, Envelope, Shape};
use crate::normalize;
use crate::objects::*;
use crate::references::{References, ResolutionPolicy};
use crate::transport::Transport;
use crate::Error;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use urlencoding::encode;

#[cfg(feature = "read-url")]
use crate::{config::Config, transport::HttpTransport};

/// Extra query parameters of a call (`lat`, `lon`, `radius`, `time`, `serviceDate`...)
///
/// They are sent in key order, after the api key. A `key` entry is ignored.
pub type Params = BTreeMap<String, String>;

const REDACTED_KEY: &str = "<redacted>";

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Client<T> {
    base_url: String,
    #[derivative(Debug = "ignore")]
    api_key: String,
    transport: T,
    policy: ResolutionPolicy,
}

#[cfg(feature = "read-url")]
impl Client<HttpTransport> {
    /// Client using reqwest, the library must be built with the read-url feature
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Client::new(
            &config.base_url,
            &config.api_key,
            HttpTransport::default(),
        ))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(base_url: &str, api_key: &str, transport: T) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            transport,
            policy: ResolutionPolicy::default(),
        }
    }

    /// What to do with ids missing from the references of a response
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Url of an API method
    pub fn url(&self, method: &str, id: Option<&str>, params: &Params) -> String {
        self.build_url(method, id, params, &self.api_key)
    }

    fn build_url(&self, method: &str, id: Option<&str>, params: &Params, key: &str) -> String {
        let mut url = format!("{}/{}", self.base_url, method);
        if let Some(id) = id {
            url.push('/');
            url.push_str(&encode(id));
        }
        let query = std::iter::once(("key", key))
            .chain(
                params
                    .iter()
                    .filter(|(k, _)| k.as_str() != "key")
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            )
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .join("&");
        format!("{}.json?{}", url, query)
    }

    fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        id: Option<&str>,
        params: &Params,
        shape: Shape,
    ) -> Result<Envelope<R>, Error> {
        let redacted = self.build_url(method, id, params, REDACTED_KEY);
        log::debug!("GET {}", redacted);
        let body = self
            .transport
            .get(&self.url(method, id, params))
            .map_err(|source| Error::Transport {
                url: redacted,
                source,
            })?;
        envelope::decode(&body, shape)
    }

    /// An entry that does not point to any other object
    fn plain<R: DeserializeOwned>(
        &self,
        method: &str,
        id: Option<&str>,
        params: &Params,
    ) -> Result<R, Error> {
        self.call::<R>(method, id, params, Shape::Entry)?
            .payload
            .into_entry()
    }

    fn entry<R, O, F>(
        &self,
        method: &str,
        id: Option<&str>,
        params: &Params,
        normalize: F,
    ) -> Result<O, Error>
    where
        R: DeserializeOwned,
        F: Fn(R, &References) -> Result<O, Error>,
    {
        let Envelope {
            payload,
            references,
            ..
        } = self.call::<R>(method, id, params, Shape::Entry)?;
        let entry = payload.into_entry()?;
        let references = References::resolve(references, self.policy)?;
        normalize(entry, &references)
    }

    fn listing<R, O, F>(
        &self,
        method: &str,
        id: Option<&str>,
        params: &Params,
        normalize: F,
    ) -> Result<Listing<O>, Error>
    where
        R: DeserializeOwned,
        F: Fn(R, &References) -> Result<O, Error>,
    {
        let Envelope {
            payload,
            references,
            limit_exceeded,
            out_of_range,
            ..
        } = self.call::<R>(method, id, params, Shape::List)?;
        let records = payload.into_list()?;
        let references = References::resolve(references, self.policy)?;
        let list = records
            .into_iter()
            .map(|r| normalize(r, &references))
            .collect::<Result<_, _>>()?;
        Ok(Listing {
            list,
            limit_exceeded,
            out_of_range,
        })
    }

    fn strings(&self, method: &str, id: &str) -> Result<Vec<String>, Error> {
        self.call::<serde::de::IgnoredAny>(method, Some(id), &Params::new(), Shape::Strings)?
            .payload
            .into_strings()
    }

    /// Methods whose answer only tells if they succeeded
    fn action(&self, method: &str, id: &str, params: &Params) -> Result<(), Error> {
        self.call::<serde::de::IgnoredAny>(method, Some(id), params, Shape::Empty)
            .map(|_| ())
    }

    pub fn agencies_with_coverage(&self) -> Result<Vec<AgencyWithCoverage>, Error> {
        self.listing(
            "agencies-with-coverage",
            None,
            &Params::new(),
            normalize::agency_with_coverage,
        )
        .map(|l| l.list)
    }

    pub fn agency(&self, id: &str) -> Result<Agency, Error> {
        self.plain("agency", Some(id), &Params::new())
    }

    /// A single arrival, `params` identify it (`tripId`, `serviceDate`, `vehicleId`, `stopSequence`...)
    pub fn arrival_and_departure_for_stop(
        &self,
        id: &str,
        params: &Params,
    ) -> Result<ArrivalAndDeparture, Error> {
        self.entry(
            "arrival-and-departure-for-stop",
            Some(id),
            params,
            normalize::arrival_and_departure,
        )
    }

    pub fn arrivals_and_departures_for_stop(
        &self,
        id: &str,
        params: &Params,
    ) -> Result<StopWithArrivalsAndDepartures, Error> {
        self.entry(
            "arrivals-and-departures-for-stop",
            Some(id),
            params,
            normalize::stop_with_arrivals_and_departures,
        )
    }

    pub fn block(&self, id: &str) -> Result<Block, Error> {
        self.plain("block", Some(id), &Params::new())
    }

    pub fn cancel_alarm(&self, id: &str) -> Result<(), Error> {
        self.action("cancel-alarm", id, &Params::new())
    }

    pub fn current_time(&self) -> Result<CurrentTime, Error> {
        self.plain("current-time", None, &Params::new())
    }

    pub fn register_alarm_for_arrival_and_departure_at_stop(
        &self,
        id: &str,
        params: &Params,
    ) -> Result<RegisteredAlarm, Error> {
        self.plain(
            "register-alarm-for-arrival-and-departure-at-stop",
            Some(id),
            params,
        )
    }

    pub fn report_problem_with_stop(&self, id: &str, params: &Params) -> Result<(), Error> {
        self.action("report-problem-with-stop", id, params)
    }

    pub fn report_problem_with_trip(&self, id: &str, params: &Params) -> Result<(), Error> {
        self.action("report-problem-with-trip", id, params)
    }

    pub fn route_ids_for_agency(&self, id: &str) -> Result<Vec<String>, Error> {
        self.strings("route-ids-for-agency", id)
    }

    pub fn route(&self, id: &str) -> Result<Route, Error> {
        self.entry("route", Some(id), &Params::new(), |r, refs| {
            normalize::route(r, &refs.agencies, refs.policy)
        })
    }

    pub fn routes_for_agency(&self, id: &str) -> Result<Vec<Route>, Error> {
        self.listing("routes-for-agency", Some(id), &Params::new(), |r, refs| {
            normalize::route(r, &refs.agencies, refs.policy)
        })
        .map(|l| l.list)
    }

    pub fn routes_for_location(&self, params: &Params) -> Result<Listing<Route>, Error> {
        self.listing("routes-for-location", None, params, |r, refs| {
            normalize::route(r, &refs.agencies, refs.policy)
        })
    }

    pub fn schedule_for_stop(&self, id: &str, params: &Params) -> Result<StopSchedule, Error> {
        self.entry(
            "schedule-for-stop",
            Some(id),
            params,
            normalize::stop_schedule,
        )
    }

    pub fn shape(&self, id: &str) -> Result<EncodedPolyline, Error> {
        self.plain("shape", Some(id), &Params::new())
    }

    pub fn stop_ids_for_agency(&self, id: &str) -> Result<Vec<String>, Error> {
        self.strings("stop-ids-for-agency", id)
    }

    pub fn stop(&self, id: &str) -> Result<Stop, Error> {
        self.entry("stop", Some(id), &Params::new(), |s, refs| {
            normalize::stop(s, &refs.routes, refs.policy)
        })
    }

    pub fn stops_for_location(&self, params: &Params) -> Result<Listing<Stop>, Error> {
        self.listing("stops-for-location", None, params, |s, refs| {
            normalize::stop(s, &refs.routes, refs.policy)
        })
    }

    pub fn stops_for_route(&self, id: &str, params: &Params) -> Result<StopsForRoute, Error> {
        self.entry(
            "stops-for-route",
            Some(id),
            params,
            normalize::stops_for_route,
        )
    }

    pub fn trip_details(&self, id: &str, params: &Params) -> Result<TripDetails, Error> {
        self.entry("trip-details", Some(id), params, normalize::trip_details)
    }

    pub fn trip_for_vehicle(&self, id: &str, params: &Params) -> Result<TripDetails, Error> {
        self.entry("trip-for-vehicle", Some(id), params, normalize::trip_details)
    }

    pub fn trip(&self, id: &str) -> Result<Trip, Error> {
        self.plain("trip", Some(id), &Params::new())
    }

    pub fn trips_for_location(&self, params: &Params) -> Result<Listing<TripDetails>, Error> {
        self.listing("trips-for-location", None, params, normalize::trip_details)
    }

    pub fn trips_for_route(&self, id: &str, params: &Params) -> Result<Listing<TripDetails>, Error> {
        self.listing("trips-for-route", Some(id), params, normalize::trip_details)
    }

    pub fn vehicles_for_agency(
        &self,
        id: &str,
        params: &Params,
    ) -> Result<Listing<VehicleStatus>, Error> {
        self.listing(
            "vehicles-for-agency",
            Some(id),
            params,
            normalize::vehicle_status,
        )
    }
}
