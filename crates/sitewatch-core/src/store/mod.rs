// ── Reactive website store ──
//
// Process-lifetime cache of the website list with push-based change
// notification.

mod website_store;

pub use website_store::WebsiteStore;
