use crate::envelope::{Shape, StatusCode};
use crate::objects::ObjectType;
use thiserror::Error;

/// Error returned by the transport collaborator
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// An error that can occur when calling the OneBusAway API.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response body
    #[error("impossible to reach '{url}'")]
    Transport {
        /// Requested url, with the api key redacted
        url: String,
        #[source]
        source: TransportError,
    },
    /// The body is not a valid OneBusAway envelope
    #[error("impossible to decode the response")]
    Decode(#[from] serde_json::Error),
    /// The envelope was decoded but its status is not 200
    #[error("the API answered {code}: {text}")]
    Api { code: i32, text: String },
    /// The envelope is successful but lacks the expected payload
    #[error("the response has no {0} payload")]
    MissingPayload(Shape),
    /// Only raised with [crate::ResolutionPolicy::Strict]
    #[error("the {object_type:?} id {id} is not in the references")]
    Reference { object_type: ObjectType, id: String },
    #[error("'{0}' is not a valid color")]
    InvalidColor(String),
    #[error("'{0}' is not a valid encoded polyline")]
    InvalidPolyline(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("impossible to read '{file_name}'")]
    NamedFileIO {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Status of an [Error::Api], `None` for every other kind of error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { code, .. } => Some(StatusCode::from_code(*code)),
            _ => None,
        }
    }
}
