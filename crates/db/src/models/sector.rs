//! Sector entity model and DTOs.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sectors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sector {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new sector.
#[derive(Debug, Deserialize)]
pub struct CreateSector {
    pub name: String,
}
