// ============================================================================
// MODELS
// ============================================================================
//
// One SeaORM entity per PostgreSQL table, plus the API response shapes.
//
//   - users : accounts (password hash never serialized)
//   - orders : orders owned by a user, with a status and a total
//   - payments : payments recorded against an order
//   - personal_access_tokens : one row per issued bearer token
//   - dto : response envelope and payload shapes
//
// Relations are declared on each entity.
//
// ============================================================================

pub mod dto;
pub mod orders;
pub mod payments;
pub mod personal_access_tokens;
pub mod users;
