//! Shared response envelope types for API handlers.
//!
//! CRUD responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` for compile-time
//! type safety and consistent serialization. The cron trigger endpoint is
//! the one exception: its report shape is part of the scheduler contract.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
