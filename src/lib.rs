//! Typed client for the [OneBusAway](https://developer.onebusaway.org/api/where) transit data API.
//!
//! Every method of the API answers with a loosely typed json envelope: the same `entry`/`list`
//! wrapper whatever the object, and the related agencies, routes, stops, trips and situations
//! shipped aside as `references`. This crate decodes the envelope, resolves those references
//! and returns plain Rust objects.
//!
//! ```no_run
//! let config = onebusaway::Config::from_env();
//! let client = onebusaway::Client::from_config(&config)?;
//! let stop = client.stop("1_75403")?;
//! for route in &stop.routes {
//!     println!("{} is served by {} ({})", stop.name, route, route.agency.name);
//! }
//! # Ok::<(), onebusaway::Error>(())
//! ```
//!
//! Objects referenced by an id missing from the references of a response are replaced by their
//! default value. Use [ResolutionPolicy::Strict] to get an [Error::Reference] instead.
//!
//! The [Client] is generic over its [Transport]: with the `read-url` feature (default) a
//! blocking reqwest client is available as [HttpTransport], any
//! `Fn(&str) -> Result<Bytes, TransportError>` can be used instead.
#[macro_use]
extern crate derivative;
#[macro_use]
extern crate serde_derive;

mod client;
mod config;
mod envelope;
mod error;
pub mod normalize;
mod objects;
pub mod records;
mod references;
mod serde_helpers;
mod transport;

#[cfg(test)]
mod tests;

pub use bytes::Bytes;
pub use client::{Client, Params};
pub use config::{Config, DEFAULT_BASE_URL};
pub use envelope::{decode, Envelope, Payload, Shape, StatusCode};
pub use error::{Error, TransportError};
pub use objects::*;
pub use references::{References, ResolutionPolicy};
#[cfg(feature = "read-url")]
pub use transport::HttpTransport;
pub use transport::Transport;
