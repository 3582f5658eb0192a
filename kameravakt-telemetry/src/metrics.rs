//! Prometheus counters over the dispatcher's decisions.

use prometheus::{Counter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub events_received: Counter,
    pub notifications_sent: Counter,
    pub events_suppressed: Counter,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let events_received = Counter::new(
            "kameravakt_events_total",
            "Complete events that reached the dispatcher",
        )
        .unwrap();
        let notifications_sent = Counter::new(
            "kameravakt_notifications_total",
            "Events that passed both suppression policies",
        )
        .unwrap();
        let events_suppressed = Counter::new(
            "kameravakt_suppressed_total",
            "Events suppressed by dampening or presence hold-off",
        )
        .unwrap();

        registry.register(Box::new(events_received.clone())).unwrap();
        registry
            .register(Box::new(notifications_sent.clone()))
            .unwrap();
        registry
            .register(Box::new(events_suppressed.clone()))
            .unwrap();

        Self {
            registry,
            events_received,
            notifications_sent,
            events_suppressed,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }

    pub fn inc_events(&self) {
        self.events_received.inc();
    }

    pub fn inc_notifications(&self) {
        self.notifications_sent.inc();
    }

    pub fn inc_suppressed(&self) {
        self.events_suppressed.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_gathered_output() {
        let metrics = MetricsRecorder::new();
        metrics.inc_events();
        metrics.inc_events();
        metrics.inc_suppressed();

        let output = metrics.gather_metrics().unwrap();
        assert!(output.contains("kameravakt_events_total 2"));
        assert!(output.contains("kameravakt_suppressed_total 1"));
        assert!(output.contains("kameravakt_notifications_total 0"));
    }
}
