use crate::normalize;
use crate::objects::*;
use crate::records::{ReferenceBundle, RouteRecord, StopRecord};
use crate::Error;
use std::sync::Arc;

/// What to do when an id points to an object absent from the references
///
/// The server does not always ship every referenced object, so by default the
/// missing object is replaced by its zero value (or left out of a list).
#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionPolicy {
    #[derivative(Default)]
    Tolerant,
    /// Fails with [Error::Reference]
    Strict,
}

/// Objects of a response `references`, with their own references resolved
///
/// Built from a single response and never shared between calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct References {
    pub agencies: Vec<Arc<Agency>>,
    pub routes: Vec<Arc<Route>>,
    pub stops: Vec<Arc<Stop>>,
    pub trips: Vec<Arc<Trip>>,
    pub situations: Vec<Arc<Situation>>,
    pub policy: ResolutionPolicy,
}

impl References {
    /// Resolves agencies, then routes, then stops; trips and situations have no dependencies
    pub fn resolve(bundle: ReferenceBundle, policy: ResolutionPolicy) -> Result<Self, Error> {
        let agencies = agencies(bundle.agencies);
        let routes = routes(bundle.routes, &agencies, policy)?;
        let stops = stops(bundle.stops, &routes, policy)?;
        Ok(References {
            agencies,
            routes,
            stops,
            trips: trips(bundle.trips),
            situations: situations(bundle.situations),
            policy,
        })
    }

    pub fn agency(&self, id: &str) -> Result<Arc<Agency>, Error> {
        lookup(&self.agencies, id, self.policy)
    }

    pub fn route(&self, id: &str) -> Result<Arc<Route>, Error> {
        lookup(&self.routes, id, self.policy)
    }

    pub fn stop(&self, id: &str) -> Result<Arc<Stop>, Error> {
        lookup(&self.stops, id, self.policy)
    }

    pub fn trip(&self, id: &str) -> Result<Arc<Trip>, Error> {
        lookup(&self.trips, id, self.policy)
    }

    pub fn stops(&self, ids: &[String]) -> Result<Vec<Arc<Stop>>, Error> {
        lookup_all(&self.stops, ids, self.policy)
    }

    pub fn situations(&self, ids: &[String]) -> Result<Vec<Arc<Situation>>, Error> {
        lookup_all(&self.situations, ids, self.policy)
    }
}

pub fn agencies(raw: Vec<Agency>) -> Vec<Arc<Agency>> {
    raw.into_iter().map(Arc::new).collect()
}

pub fn routes(
    raw: Vec<RouteRecord>,
    agencies: &[Arc<Agency>],
    policy: ResolutionPolicy,
) -> Result<Vec<Arc<Route>>, Error> {
    raw.into_iter()
        .map(|r| normalize::route(r, agencies, policy).map(Arc::new))
        .collect()
}

pub fn stops(
    raw: Vec<StopRecord>,
    routes: &[Arc<Route>],
    policy: ResolutionPolicy,
) -> Result<Vec<Arc<Stop>>, Error> {
    raw.into_iter()
        .map(|s| normalize::stop(s, routes, policy).map(Arc::new))
        .collect()
}

pub fn trips(raw: Vec<Trip>) -> Vec<Arc<Trip>> {
    raw.into_iter().map(Arc::new).collect()
}

pub fn situations(raw: Vec<Situation>) -> Vec<Arc<Situation>> {
    raw.into_iter().map(Arc::new).collect()
}

fn find<'a, T: Id>(objects: &'a [Arc<T>], id: &str) -> Option<&'a Arc<T>> {
    objects.iter().find(|o| o.id() == id)
}

/// Finds the object with the given id
///
/// An empty id is not a reference, it always gives the zero value.
pub fn lookup<T>(objects: &[Arc<T>], id: &str, policy: ResolutionPolicy) -> Result<Arc<T>, Error>
where
    T: Id + Type + Default,
{
    if id.is_empty() {
        return Ok(Arc::new(T::default()));
    }
    match find(objects, id) {
        Some(o) => Ok(Arc::clone(o)),
        None => missing::<T>(id, policy).map(|_| Arc::new(T::default())),
    }
}

/// Finds the objects with the given ids, leaving out the ones that are not found
pub fn lookup_all<T>(
    objects: &[Arc<T>],
    ids: &[String],
    policy: ResolutionPolicy,
) -> Result<Vec<Arc<T>>, Error>
where
    T: Id + Type,
{
    let mut found = Vec::with_capacity(ids.len());
    for id in ids.iter().filter(|id| !id.is_empty()) {
        match find(objects, id) {
            Some(o) => found.push(Arc::clone(o)),
            None => missing::<T>(id, policy)?,
        }
    }
    Ok(found)
}

fn missing<T: Type>(id: &str, policy: ResolutionPolicy) -> Result<(), Error> {
    match policy {
        ResolutionPolicy::Tolerant => {
            log::warn!("{:?} {} is not in the references", T::OBJECT_TYPE, id);
            Ok(())
        }
        ResolutionPolicy::Strict => Err(Error::Reference {
            object_type: T::OBJECT_TYPE,
            id: id.to_owned(),
        }),
    }
}
