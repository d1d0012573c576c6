//! Decoding of the generic OneBusAway response envelope
//!
//! Every API method answers with the same wrapper:
//!
//! ```json
//! {"code": 200, "text": "OK", "currentTime": 1270614730908, "version": 2,
//!  "data": {"entry": {}, "limitExceeded": false, "references": {}}}
//! ```
//!
//! The decoder only knows about this wrapper, the record type `T` is chosen by the caller.
use crate::records::ReferenceBundle;
use crate::serde_helpers::deserialize_millis;
use crate::Error;
use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;

/// Which part of `data` the calling method expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A single record under `data.entry`
    Entry,
    /// A list of records under `data.list`
    List,
    /// A list of plain strings under `data.list`
    Strings,
    /// Nothing, only the status matters
    Empty,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Shape::Entry => write!(f, "entry"),
            Shape::List => write!(f, "list"),
            Shape::Strings => write!(f, "string list"),
            Shape::Empty => write!(f, "empty"),
        }
    }
}

/// Documented values of the envelope `code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    InvalidParameter,
    Unauthorized,
    NotFound,
    ServerError,
    Other(i32),
}

impl StatusCode {
    pub fn from_code(code: i32) -> Self {
        match code {
            200 => StatusCode::Ok,
            400 => StatusCode::InvalidParameter,
            401 => StatusCode::Unauthorized,
            404 => StatusCode::NotFound,
            500 => StatusCode::ServerError,
            c => StatusCode::Other(c),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::InvalidParameter => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::NotFound => 404,
            StatusCode::ServerError => 500,
            StatusCode::Other(c) => *c,
        }
    }
}

/// Content of `data`, one variant per [Shape]
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Entry(T),
    List(Vec<T>),
    Strings(Vec<String>),
    Empty,
}

impl<T> Payload<T> {
    pub fn shape(&self) -> Shape {
        match self {
            Payload::Entry(_) => Shape::Entry,
            Payload::List(_) => Shape::List,
            Payload::Strings(_) => Shape::Strings,
            Payload::Empty => Shape::Empty,
        }
    }

    pub fn into_entry(self) -> Result<T, Error> {
        match self {
            Payload::Entry(e) => Ok(e),
            _ => Err(Error::MissingPayload(Shape::Entry)),
        }
    }

    pub fn into_list(self) -> Result<Vec<T>, Error> {
        match self {
            Payload::List(l) => Ok(l),
            _ => Err(Error::MissingPayload(Shape::List)),
        }
    }

    pub fn into_strings(self) -> Result<Vec<String>, Error> {
        match self {
            Payload::Strings(l) => Ok(l),
            _ => Err(Error::MissingPayload(Shape::Strings)),
        }
    }
}

/// A successfully decoded response
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub code: i32,
    pub text: String,
    pub current_time: DateTime<Utc>,
    pub version: i32,
    pub payload: Payload<T>,
    pub limit_exceeded: bool,
    pub out_of_range: bool,
    /// Objects referenced by id from the payload
    pub references: ReferenceBundle,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusLine {
    code: i32,
    #[serde(default)]
    text: String,
    #[serde(default, deserialize_with = "deserialize_millis")]
    current_time: DateTime<Utc>,
    #[serde(default)]
    version: i32,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope<T> {
    data: Option<RawData<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawData<T> {
    entry: Option<T>,
    list: Option<Vec<T>>,
    #[serde(default)]
    limit_exceeded: bool,
    #[serde(default)]
    out_of_range: bool,
    #[serde(default)]
    references: ReferenceBundle,
}

impl<T> Default for RawData<T> {
    fn default() -> Self {
        RawData {
            entry: None,
            list: None,
            limit_exceeded: false,
            out_of_range: false,
            references: ReferenceBundle::default(),
        }
    }
}

/// Decodes a response body, expecting the payload described by `shape`
///
/// The status is checked before `data` is looked at, so that an error envelope
/// with an unexpected `data` is still reported as [Error::Api].
pub fn decode<T: DeserializeOwned>(body: &[u8], shape: Shape) -> Result<Envelope<T>, Error> {
    let status: StatusLine = serde_json::from_slice(body)?;
    log::debug!(
        "decoded envelope with code {} (version {})",
        status.code,
        status.version
    );
    if status.code != StatusCode::Ok.code() {
        return Err(Error::Api {
            code: status.code,
            text: status.text,
        });
    }

    match shape {
        Shape::Empty => {
            let _: RawEnvelope<IgnoredAny> = serde_json::from_slice(body)?;
            Ok(build(status, RawData::<IgnoredAny>::default(), Payload::Empty))
        }
        Shape::Strings => {
            let mut data = serde_json::from_slice::<RawEnvelope<String>>(body)?
                .data
                .unwrap_or_default();
            let list = data.list.take().ok_or(Error::MissingPayload(shape))?;
            Ok(build(status, data, Payload::Strings(list)))
        }
        Shape::Entry => {
            let mut data = serde_json::from_slice::<RawEnvelope<T>>(body)?
                .data
                .unwrap_or_default();
            let entry = data.entry.take().ok_or(Error::MissingPayload(shape))?;
            Ok(build(status, data, Payload::Entry(entry)))
        }
        Shape::List => {
            let mut data = serde_json::from_slice::<RawEnvelope<T>>(body)?
                .data
                .unwrap_or_default();
            let list = data.list.take().ok_or(Error::MissingPayload(shape))?;
            Ok(build(status, data, Payload::List(list)))
        }
    }
}

fn build<R, T>(status: StatusLine, data: RawData<R>, payload: Payload<T>) -> Envelope<T> {
    Envelope {
        code: status.code,
        text: status.text,
        current_time: status.current_time,
        version: status.version,
        payload,
        limit_exceeded: data.limit_exceeded,
        out_of_range: data.out_of_range,
        references: data.references,
    }
}
