//! Format set cache.
//!
//! Holds one immutable [`FormatSet`](crate::domain::FormatSet) per effective
//! time zone and locale, derived on demand from a template set.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! warm = ["Europe/Paris@fr_FR", "Asia/Tokyo", "@de_DE"]
//! ```

mod config;
mod keys;
mod lock;
mod store;

pub use config::{CacheConfig, WarmTarget};
pub use keys::FormatSetKey;
pub use store::FormatSetCache;

pub(crate) use store::{
    METRIC_CACHE_ENTRIES, METRIC_CACHE_HIT_TOTAL, METRIC_CACHE_LOAD_MS, METRIC_CACHE_MISS_TOTAL,
};
