//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token endpoints allow one request per second with a burst of ten.
fn auth_config<K: KeyExtractor>(extractor: K) -> GovernorConfig<K, NoOpMiddleware<QuantaInstant>> {
    let mut builder = GovernorConfigBuilder::default().key_extractor(extractor);
    builder.per_second(1).burst_size(10);

    builder
        .finish()
        .unwrap_or_else(|| unreachable!("non-zero rate limit settings"))
}

/// Creates the rate limiter for the token endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with connect info.
///
/// # Example
///
/// ```rust,ignore
/// let auth = Router::new()
///     .route("/auth/token", post(obtain_token_handler))
///     .layer(rate_limit::auth_layer());
/// ```
pub fn auth_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    GovernorLayer::new(Arc::new(auth_config(PeerIpKeyExtractor)))
}

/// Same limits as [`auth_layer`], keyed by `X-Forwarded-For` / `X-Real-IP`.
///
/// Use only behind a trusted reverse proxy.
pub fn auth_layer_behind_proxy()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    GovernorLayer::new(Arc::new(auth_config(SmartIpKeyExtractor)))
}
