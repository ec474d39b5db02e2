//! Resource monitoring dashboard: three gauges fed from a stats snapshot.

use crate::animation::DEFAULT_DURATION;
use crate::error::Result;
use crate::format::{Colorizer, Label};
use crate::gauge::Gauge;
use crate::options::GaugeConfig;
use crate::scale::ThresholdScale;
use crate::scheduler::FrameScheduler;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// How often a host should poll for fresh [`MonitoringStats`].
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Wait times at or past this many seconds peg the wait gauge.
pub const MAX_WAIT_SECS: f64 = 60.0;

/// Snapshot of a resource pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitoringStats {
    /// Resources in the pool
    pub available_resources: u32,
    /// Requests handled so far
    pub total_requests: u64,
    /// Resources currently handed out
    pub resources_used: u32,
    /// Requests queued for a resource
    pub waiting_requests: u32,
    /// Mean queueing time in milliseconds
    pub average_wait_time_ms: f64,
}

/// Response body wrapping a payload in `{"result": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The payload
    pub result: T,
}

impl MonitoringStats {
    /// Parse a `{"result": {...}}` stats response.
    pub fn from_response(json: &str) -> Result<Self> {
        let envelope: Envelope<Self> = serde_json::from_str(json)?;
        Ok(envelope.result)
    }

    /// Average wait in seconds.
    #[must_use]
    pub fn average_wait_secs(&self) -> f64 {
        self.average_wait_time_ms / 1000.0
    }
}

/// Where each dashboard gauge is mounted.
#[derive(Debug, Clone)]
pub struct DashboardMounts<N> {
    /// Resources used out of available
    pub usage: N,
    /// Average wait time
    pub wait_time: N,
    /// Waiting requests
    pub waiting: N,
}

/// The three monitoring gauges.
pub struct DashboardGauges<S: Surface + 'static> {
    usage: Gauge<S>,
    wait_time: Gauge<S>,
    waiting: Gauge<S>,
    available: Rc<Cell<f64>>,
}

impl<S: Surface + Clone + 'static> DashboardGauges<S> {
    /// Build the gauges on `surface`.
    pub fn new(
        surface: &S,
        mounts: &DashboardMounts<S::Node>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Result<Self> {
        let available = Rc::new(Cell::new(0.0));

        let usage = Gauge::new(
            surface.clone(),
            &mounts.usage,
            GaugeConfig::new()
                .label(Label::OutOfMax)
                .thresholds(ThresholdScale::resource_usage())
                .animated(DEFAULT_DURATION),
            scheduler.clone(),
        )?;

        let wait_time = Gauge::new(
            surface.clone(),
            &mounts.wait_time,
            GaugeConfig::new()
                .max(MAX_WAIT_SECS)
                .label(Label::Fixed { decimals: 1 })
                .thresholds(ThresholdScale::wait_time())
                .animated(DEFAULT_DURATION),
            scheduler.clone(),
        )?;

        let pool = available.clone();
        let waiting = Gauge::new(
            surface.clone(),
            &mounts.waiting,
            GaugeConfig::new()
                .max(1.0)
                .color(Colorizer::custom(move |v| {
                    ThresholdScale::wait_count(pool.get()).color_for(v, 0.0)
                }))
                .animated(DEFAULT_DURATION),
            scheduler,
        )?;

        Ok(Self {
            usage,
            wait_time,
            waiting,
            available,
        })
    }

    /// Push a stats snapshot into the gauges.
    ///
    /// The usage gauge is rescaled to the pool size first. The waiting
    /// gauge is scaled to the pool size or the queue, whichever is larger,
    /// so a long queue is never cut off.
    pub fn apply(&self, stats: &MonitoringStats) -> Result<()> {
        let available = f64::from(stats.available_resources);
        let waiting = f64::from(stats.waiting_requests);
        self.available.set(available);

        tracing::debug!(
            available,
            used = stats.resources_used,
            waiting = stats.waiting_requests,
            wait_ms = stats.average_wait_time_ms,
            "applying monitoring stats"
        );

        // rescaling repaints, so colors follow the new pool even when the
        // values below are unchanged
        self.usage.set_max_value(available)?;
        self.usage.update(f64::from(stats.resources_used))?;
        self.wait_time.update(stats.average_wait_secs())?;
        self.waiting.set_max_value(available.max(waiting).max(1.0))?;
        self.waiting.update(waiting)
    }

    /// Resources used out of available.
    #[must_use]
    pub fn usage(&self) -> &Gauge<S> {
        &self.usage
    }

    /// Average wait time in seconds.
    #[must_use]
    pub fn wait_time(&self) -> &Gauge<S> {
        &self.wait_time
    }

    /// Waiting requests.
    #[must_use]
    pub fn waiting(&self) -> &Gauge<S> {
        &self.waiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{GREEN, RED, YELLOW};
    use crate::scheduler::ManualScheduler;
    use crate::surface::{NodeId, SvgDocument};
    use std::cell::RefCell;

    type Shared = Rc<RefCell<SvgDocument>>;

    fn dashboard() -> (DashboardGauges<Shared>, Shared, Rc<ManualScheduler>) {
        let (gauges, doc, scheduler, _) = dashboard_with_mounts();
        (gauges, doc, scheduler)
    }

    fn dashboard_with_mounts() -> (
        DashboardGauges<Shared>,
        Shared,
        Rc<ManualScheduler>,
        DashboardMounts<NodeId>,
    ) {
        let doc = Rc::new(RefCell::new(SvgDocument::new()));
        let mounts = {
            let mut d = doc.borrow_mut();
            DashboardMounts {
                usage: d.mount_point(),
                wait_time: d.mount_point(),
                waiting: d.mount_point(),
            }
        };
        let scheduler = Rc::new(ManualScheduler::new());
        let gauges = DashboardGauges::new(&doc, &mounts, scheduler.clone()).unwrap();
        (gauges, doc, scheduler, mounts)
    }

    fn text(doc: &Shared, gauge: &Gauge<Shared>) -> String {
        let id: NodeId = gauge.handles().value_text;
        doc.borrow().text(id).unwrap_or_default().to_string()
    }

    fn stroke(doc: &Shared, gauge: &Gauge<Shared>) -> String {
        let id = gauge.handles().value_path;
        doc.borrow()
            .attribute(id, "style")
            .unwrap_or_default()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim_start_matches("stroke: ")
            .to_string()
    }

    #[test]
    fn test_parse_envelope() {
        let stats = MonitoringStats::from_response(
            r#"{"result": {"availableResources": 10, "totalRequests": 512,
                "resourcesUsed": 4, "waitingRequests": 2, "averageWaitTimeMs": 1500}}"#,
        )
        .unwrap();
        assert_eq!(stats.available_resources, 10);
        assert_eq!(stats.total_requests, 512);
        assert_eq!(stats.average_wait_secs(), 1.5);
    }

    #[test]
    fn test_parse_envelope_missing_fields_default() {
        let stats = MonitoringStats::from_response(r#"{"result": {"resourcesUsed": 3}}"#).unwrap();
        assert_eq!(stats.resources_used, 3);
        assert_eq!(stats.available_resources, 0);
    }

    #[test]
    fn test_parse_without_envelope_fails() {
        assert!(MonitoringStats::from_response(r#"{"resourcesUsed": 3}"#).is_err());
    }

    #[test]
    fn test_three_gauges_mounted() {
        let (gauges, doc, _, mounts) = dashboard_with_mounts();
        let doc = doc.borrow();
        for mount in [mounts.usage, mounts.wait_time, mounts.waiting] {
            assert_eq!(doc.children(mount).len(), 1);
        }
        assert_eq!(doc.text(gauges.usage().handles().value_text), Some("0 / 100"));
        assert_eq!(doc.text(gauges.wait_time().handles().value_text), Some("0.0"));
    }

    #[test]
    fn test_apply_animates_to_stats() {
        let (gauges, doc, scheduler) = dashboard();
        gauges
            .apply(&MonitoringStats {
                available_resources: 10,
                total_requests: 0,
                resources_used: 8,
                waiting_requests: 1,
                average_wait_time_ms: 30_000.0,
            })
            .unwrap();
        assert!(gauges.usage().is_animating());
        scheduler.run_until_idle(200);

        assert_eq!(gauges.usage().get_value(), 8.0);
        assert_eq!(gauges.usage().get_options().max, 10.0);
        assert_eq!(text(&doc, gauges.usage()), "8 / 10");
        assert_eq!(text(&doc, gauges.wait_time()), "30.0");
        assert_eq!(text(&doc, gauges.waiting()), "1");

        assert_eq!(stroke(&doc, gauges.usage()), YELLOW);
        assert_eq!(stroke(&doc, gauges.wait_time()), YELLOW);
        assert_eq!(stroke(&doc, gauges.waiting()), GREEN);
    }

    #[test]
    fn test_waiting_color_with_empty_pool() {
        let (gauges, doc, scheduler) = dashboard();
        gauges
            .apply(&MonitoringStats {
                waiting_requests: 3,
                ..MonitoringStats::default()
            })
            .unwrap();
        scheduler.run_until_idle(200);
        assert_eq!(stroke(&doc, gauges.waiting()), RED);
        assert_eq!(text(&doc, gauges.waiting()), "3");

        gauges.apply(&MonitoringStats::default()).unwrap();
        scheduler.run_until_idle(200);
        assert_eq!(stroke(&doc, gauges.waiting()), "black");
    }

    #[test]
    fn test_repeated_stats_do_not_restart() {
        let (gauges, _doc, scheduler) = dashboard();
        let stats = MonitoringStats {
            available_resources: 4,
            resources_used: 1,
            ..MonitoringStats::default()
        };
        gauges.apply(&stats).unwrap();
        scheduler.run_until_idle(200);
        gauges.apply(&stats).unwrap();
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_colors_follow_pool_when_values_hold() {
        let (gauges, doc, scheduler) = dashboard();
        let before = MonitoringStats {
            available_resources: 10,
            resources_used: 9,
            ..MonitoringStats::default()
        };
        gauges.apply(&before).unwrap();
        scheduler.run_until_idle(200);
        assert_eq!(stroke(&doc, gauges.usage()), RED);

        gauges
            .apply(&MonitoringStats {
                available_resources: 100,
                ..before
            })
            .unwrap();
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(stroke(&doc, gauges.usage()), GREEN);
        assert_eq!(text(&doc, gauges.usage()), "9 / 100");
    }

    #[test]
    fn test_waiting_color_follows_pool() {
        let (gauges, doc, scheduler) = dashboard();
        let queued = MonitoringStats {
            waiting_requests: 3,
            ..MonitoringStats::default()
        };
        gauges.apply(&queued).unwrap();
        scheduler.run_until_idle(200);
        assert_eq!(stroke(&doc, gauges.waiting()), RED);

        gauges
            .apply(&MonitoringStats {
                available_resources: 100,
                ..queued
            })
            .unwrap();
        assert_eq!(gauges.waiting().get_value(), 3.0);
        assert_eq!(stroke(&doc, gauges.waiting()), GREEN);
    }

    #[test]
    fn test_refresh_interval() {
        assert_eq!(REFRESH_INTERVAL, Duration::from_secs(5));
    }
}
