//! # assocsync-client
//!
//! HTTP implementation of [`AssociationTransport`] for the control-plane
//! REST surface:
//!
//! | Operation      | Request                                                        |
//! |----------------|----------------------------------------------------------------|
//! | associate      | `PUT /instance/{id}/lambda-function` `{"FunctionArn": ...}`    |
//! | disassociate   | `DELETE /instance/{id}/lambda-function?functionArn=...`        |
//! | list           | `GET /instance/{id}/lambda-functions?maxResults=N&nextToken=T` |
//!
//! Error statuses are classified with [`TransportError::from_http_status`].
//!
//! [`AssociationTransport`]: assocsync_core::AssociationTransport
//! [`TransportError::from_http_status`]: assocsync_core::TransportError::from_http_status

mod auth;
mod error;
mod http;

pub use auth::Credentials;
pub use error::ClientError;
pub use http::{DEFAULT_REQUEST_TIMEOUT, HttpTransport};
