use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Login flow
    pub login_requests: IntCounterVec,
    pub login_failures: IntCounterVec,
    pub login_duration: HistogramVec,

    // Issuer
    pub tokens_issued: IntCounterVec,
    pub signing_failures: IntCounter,

    // Dispatcher
    pub dispatches: IntCounterVec,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        // Metric names and label sets below are static and valid.
        let registry = Registry::new_custom(Some("ssoagent".into()), None)
            .expect("static registry prefix");

        let metrics: Arc<Metrics> = Arc::new(Self {
            login_requests: IntCounterVec::new(Opts::new("login_requests_total", "Login requests by resolver"), &["resolver"]).expect("metric"),
            login_failures: IntCounterVec::new(Opts::new("login_failures_total", "Rejected logins by reason"), &["resolver", "reason"]).expect("metric"),
            login_duration: HistogramVec::new(HistogramOpts::new("login_duration_seconds", "Login handling duration seconds").buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["resolver"]).expect("metric"),

            tokens_issued: IntCounterVec::new(Opts::new("tokens_issued_total", "Signed tokens by algorithm"), &["algorithm"]).expect("metric"),
            signing_failures: IntCounter::new("signing_failures_total", "Token signing failures").expect("metric"),

            dispatches: IntCounterVec::new(Opts::new("dispatch_total", "Token deliveries by mode"), &["mode"]).expect("metric"),

            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").expect("metric"),
            up: IntGauge::new("up", "1 if service is serving").expect("metric"),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(metrics.login_requests.clone()),
            Box::new(metrics.login_failures.clone()),
            Box::new(metrics.login_duration.clone()),
            Box::new(metrics.tokens_issued.clone()),
            Box::new(metrics.signing_failures.clone()),
            Box::new(metrics.dispatches.clone()),
            Box::new(metrics.config_validation_errors.clone()),
            Box::new(metrics.up.clone()),
        ];
        for c in collectors {
            reg.register(c).expect("metric registered once");
        }

        metrics
    }
}
