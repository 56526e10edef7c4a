//! Shared response envelope for the editorial API.
//!
//! Admin endpoints wrap payloads as `{ "data": ... }`. The public dashboard
//! endpoints return their documented flat shapes instead.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
