//! Provider-facing defaults (data) and profile fetchers (behavior).
//!
//! `defaults` holds the per-provider fallbacks applied while building a
//! [`StrategyConfig`](crate::config::StrategyConfig). `fetcher` defines [`ProfileFetcher`],
//! the pluggable capability a generic [`Strategy`](crate::strategy::Strategy) calls after the
//! token exchange to turn an access token into a [`NormalizedProfile`](crate::profile::NormalizedProfile).

pub mod defaults;
pub mod fetcher;

pub use defaults::*;
pub use fetcher::*;
