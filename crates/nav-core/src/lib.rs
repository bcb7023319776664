//! `nav-core` — foundational types for the nav route-progress engine.
//!
//! This crate is a dependency of every other `nav-*` crate.  It intentionally
//! has no `nav-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`geo`]     | `Coordinate` — WGS-84 (longitude, latitude) pair    |
//! | [`route`]   | `Route`, `Leg`, `Step`, `Intersection`              |
//! | [`error`]   | `RouteError`, `RouteResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.      |

pub mod error;
pub mod geo;
pub mod route;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RouteError, RouteResult};
pub use geo::Coordinate;
pub use route::{Intersection, Leg, Route, Step};
