use metrics::counter;

pub struct Telemetry;

impl Telemetry {
    /// `outcome` is one of `owned`, `inherited`, `empty` or `depth_limit`.
    pub fn record_resolution(outcome: &'static str) {
        counter!("ecm_resolutions_total", "outcome" => outcome).increment(1);
    }

    pub fn record_depth_limit() {
        counter!("ecm_resolver_depth_limit_total").increment(1);
    }

    /// `kind` is `nodes` or `side_data`.
    pub fn record_fetch(kind: &'static str) {
        counter!("ecm_loader_fetches_total", "kind" => kind).increment(1);
    }

    pub fn record_fetch_error(kind: &'static str) {
        counter!("ecm_loader_fetch_errors_total", "kind" => kind).increment(1);
    }

    pub fn record_skipped() {
        counter!("ecm_loader_skipped_total").increment(1);
    }
}
