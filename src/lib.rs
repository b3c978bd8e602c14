//! `biolink-water` – water-quality assessments from sensor telemetry.
//!
//! The crate is split into a pure derivation [`engine`] and the service
//! plumbing around it:
//!
//! - [`engine`]: normalization, vitality score, safety class, purpose
//!   suitability and rolling-window trend analytics
//! - [`models`]: raw readings, normalized readings and stored snapshots
//! - [`telemetry`]: fetches the latest raw reading
//! - [`store`]: append-only snapshot storage (PostgreSQL)
//! - [`schema`]: idempotent table creation
//! - [`routes`]: HTTP query surface
//! - [`config`]: environment-driven configuration
//!
//! The engine only ever sees explicit arguments; it never touches storage,
//! the network or a clock.

pub mod config;
pub mod engine;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;
pub mod telemetry;

pub use config::Config;

// Re-exported so routes/*.rs depend on the crate root rather than on the
// engine's internal layout.
pub use engine::{analyze_trend, derive_snapshot, AnalyticsReport, Purpose, PurposeVerdict};
pub use models::{RawReading, Reading, SafetyStatus, Snapshot};
