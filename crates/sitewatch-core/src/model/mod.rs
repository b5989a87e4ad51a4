// ── Domain model ──
//
// Canonical client-side representation of the downtime-alert entities.
// Consumers (CLI/TUI) depend on these types, never on the wire types.

pub mod report;
pub mod status;
pub mod website;

// ── Re-exports ──────────────────────────────────────────────────────
pub use report::Report;
pub use status::{DisplayState, StatusSample};
pub use website::{NewWebsite, Website, WebsiteId};
