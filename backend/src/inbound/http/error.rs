//! HTTP adapter mapping for domain errors.
//!
//! [`ResponseError`] for [`Error`] is the single place where failures turn
//! into status codes and JSON envelopes. The extractor error handlers route
//! malformed bodies, query strings and paths through the same envelope.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

use super::validation::{FieldViolation, Location, validation_error};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DependencyFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = TraceId::current().map_or_else(String::new, |id| id.to_string());
        debug!(
            %trace_id,
            status = status.as_u16(),
            message = self.message(),
            "returning error envelope"
        );
        HttpResponse::build(status).json(self)
    }
}

fn extractor_error(location: Location, message: String, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), ?location, %message, "request rejected by extractor");
    validation_error(Value::Null, &[FieldViolation::whole(location, message)]).into()
}

/// Error handler for `web::JsonConfig`.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    extractor_error(Location::Body, err.to_string(), req)
}

/// Error handler for `web::QueryConfig`.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    extractor_error(Location::Query, err.to_string(), req)
}

/// Error handler for `web::PathConfig`.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    extractor_error(Location::Path, err.to_string(), req)
}
