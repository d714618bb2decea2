//! Whole-pipeline scenarios driven by a simulated clock

use noisemon::alerts::{AlertEvent, AlertPhase, NotificationManager, Notifier, ToneSequence};
use noisemon::clock::{Clock, ManualClock};
use noisemon::config::Config;
use noisemon::domain::{MonitorConfig, Severity};
use noisemon::sensor::ReplaySource;
use noisemon::services::{ApiHandler, ApiRequest, Engine, NoiseMonitor};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Collector(Arc<Mutex<Vec<(AlertEvent, usize)>>>);

impl Notifier for Collector {
    fn notify(&self, alert: &AlertEvent, tone: &ToneSequence) -> noisemon::Result<()> {
        self.0.lock().unwrap().push((*alert, tone.len()));
        Ok(())
    }

    fn name(&self) -> &str {
        "collector"
    }
}

const STEP_MS: u64 = 50;

/// Settle the baseline at `level`, returning the next clock reading
fn settle(engine: &mut Engine, level: u16, samples: u64) -> u64 {
    for i in 0..samples {
        assert!(engine.process_sample(level, i * STEP_MS).is_none());
    }
    samples * STEP_MS
}

#[test]
fn sustained_jump_fires_once_after_threshold() {
    let mut engine = Engine::default();
    let mut now = settle(&mut engine, 100, 400);
    assert!((engine.processor().get_baseline() - 100.0).abs() < 1e-6);

    let mut first_critical = None;
    let mut events: Vec<AlertEvent> = Vec::new();
    // Hold 250 for long enough to cross the threshold but not the beep interval
    while events.is_empty() || now < events[0].fired_at_ms + 400 {
        events.extend(engine.process_sample(250, now));
        if first_critical.is_none() && engine.processor().get_noise_category() == Severity::Critical {
            first_critical = Some(now);
        }
        now += STEP_MS;
        assert!(now < 60_000, "no alert fired");
    }

    let elevated_since = engine
        .alerts()
        .state()
        .elevation_start_ms
        .expect("elevation timer running");
    assert!(first_critical.is_some());
    assert_eq!(events.len(), 1);
    assert!(events[0].fired_at_ms - elevated_since >= 5_000);
    assert_eq!(events[0].severity, Severity::Critical);
    assert_eq!(engine.alerts().phase(), AlertPhase::Elevated);

    // Quiet again: once the level decays the timer clears
    for _ in 0..400 {
        engine.process_sample(100, now);
        now += STEP_MS;
    }
    assert_eq!(engine.alerts().phase(), AlertPhase::Idle);
}

#[test]
fn replayed_recording_escalates_into_cooldown() {
    let mut text = String::from("# quiet room\n");
    text.push_str(&"100\n".repeat(200));
    text.push_str("# party starts\n");
    text.push_str(&"900\n".repeat(400));

    let clock = ManualClock::new(0);
    let collector = Collector::default();
    let mut notifier = NotificationManager::new();
    notifier.add_notifier(Box::new(collector.clone()));

    let source = ReplaySource::new(Cursor::new(text), "recording");
    let mut monitor = NoiseMonitor::new(Engine::default(), source, &clock).with_notifier(notifier);
    let summary = monitor.run(None).unwrap();

    assert_eq!(summary.samples_processed, 600);
    assert_eq!(clock.now_ms(), 601 * STEP_MS);

    // Three rapid alerts, the repeats escalated, then a cooldown
    let received = collector.0.lock().unwrap().clone();
    assert_eq!(received.len(), 3);
    assert!(!received[0].0.escalated);
    assert_eq!(received[0].1, 4);
    assert!(received[1].0.escalated);
    assert_eq!(received[2].1, 8);
    assert_eq!(summary.status.alert.phase, AlertPhase::Cooldown);
    assert_eq!(summary.status.alerts_fired, 3);
}

#[test]
fn malformed_recording_stops_strict_run() {
    let clock = ManualClock::new(0);
    let source = ReplaySource::new(Cursor::new("100\nloud\n100\n"), "bad");
    let mut monitor = NoiseMonitor::new(Engine::default(), source, &clock)
        .with_notifier(NotificationManager::new());
    assert!(monitor.run(None).is_err());

    let source = ReplaySource::new(Cursor::new("100\nloud\n100\n"), "bad").lenient();
    let mut monitor = NoiseMonitor::new(Engine::default(), source, &clock)
        .with_notifier(NotificationManager::new());
    assert_eq!(monitor.run(None).unwrap().samples_processed, 2);
}

#[test]
fn api_manages_monitors_during_run() {
    let mut engine = Engine::default();
    settle(&mut engine, 120, 10);

    let mut api = ApiHandler::new(&mut engine);
    let created = api.handle(&ApiRequest::post(
        "/api/monitors",
        r#"{"id":"10s","label":"10 Seconds","period_ms":10000,"priority":0,"history_size":5}"#,
    ));
    assert_eq!(created.status, 201);

    let deleted = api.handle(&ApiRequest::delete("/api/monitor?id=1min"));
    assert_eq!(deleted.status, 200);
    let again = api.handle(&ApiRequest::delete("/api/monitor?id=1min"));
    assert_eq!(again, deleted);

    for i in 0..8 {
        engine.process_sample(120, 1_000 + i);
    }

    let ten = engine.get_monitor("10s").unwrap();
    assert_eq!(ten.stats().history.len(), 5);
    let ids: Vec<&str> = engine
        .get_priority_monitors(10)
        .into_iter()
        .map(|m| m.id())
        .collect();
    assert_eq!(ids, vec!["10s", "5min"]);
    assert_eq!(
        engine.config().monitors,
        vec![
            MonitorConfig::new("5min", "5 Minutes", 300_000, 2),
            MonitorConfig::new("10s", "10 Seconds", 10_000, 0).with_history_size(5),
        ]
    );
}

#[test]
fn rejected_update_keeps_running_configuration() {
    let mut engine = Engine::default();
    let mut good = Config::default();
    good.alert.max_alerts = 5;
    engine.apply_config(good.clone()).unwrap();

    let mut api = ApiHandler::new(&mut engine);
    let response = api.handle(&ApiRequest::put(
        "/api/config",
        r#"{"alert":{"base_cooldown_ms":600000}}"#,
    ));
    assert_eq!(response.status, 400);
    assert_eq!(response.body["code"], 400);

    assert_eq!(engine.config(), &good);
    assert_eq!(engine.alerts().config().base_cooldown_ms, 30_000);
}
