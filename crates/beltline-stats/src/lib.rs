//! Production statistics for the Beltline engine.
//!
//! Tracks line throughput and per-station output over a configurable
//! rolling window. Listens to core events (`CodeFed`, `CodeDelivered`,
//! `PickupStarted`, `BuildCompleted`, `ProductDropped`) and aggregates
//! them into metrics using [`Fixed64`] arithmetic.
//!
//! # Usage
//!
//! ```ignore
//! let mut stats = LineStats::new(StatsConfig::default());
//! // After each engine step:
//! for event in engine.drain_events() {
//!     stats.process_event(&event);
//! }
//! stats.end_tick();
//! // Query metrics:
//! let rate = stats.production_rate();
//! ```

use std::collections::{HashMap, VecDeque};

use beltline_core::code::Code;
use beltline_core::event::Event;

/// Q32.32 fixed-point used for all rate arithmetic.
pub type Fixed64 = fixed::types::I32F32;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the statistics module.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Window size in ticks for rolling averages.
    pub window_size: usize,
    /// Maximum number of historical rate samples to retain.
    pub history_capacity: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_size: 60,
            history_capacity: 256,
        }
    }
}

// ---------------------------------------------------------------------------
// RateHistory — bounded trail of rate samples
// ---------------------------------------------------------------------------

/// A bounded trail of [`Fixed64`] rate samples for trend queries.
///
/// Pushing past `capacity` discards the oldest sample. Iteration and
/// [`average`](Self::average) run oldest to newest.
#[derive(Debug, Clone)]
pub struct RateHistory {
    samples: VecDeque<Fixed64>,
    capacity: usize,
}

impl RateHistory {
    /// # Panics
    ///
    /// Panics when `capacity` is zero; a history that can hold nothing
    /// cannot answer any query.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity > 0,
            "rate history needs room for at least one sample"
        );
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, discarding the oldest once at capacity.
    pub fn push(&mut self, sample: Fixed64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Number of samples currently stored.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<Fixed64> {
        self.samples.back().copied()
    }

    /// Samples oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Fixed64> + '_ {
        self.samples.iter().copied()
    }

    /// Mean of the stored samples; zero when none are stored.
    pub fn average(&self) -> Fixed64 {
        if self.samples.is_empty() {
            return Fixed64::ZERO;
        }
        let total: Fixed64 = self.iter().sum();
        total / Fixed64::from_num(self.samples.len() as u64)
    }
}

// ---------------------------------------------------------------------------
// Throughput window
// ---------------------------------------------------------------------------

/// Per-tick drop counts over the most recent `window` ticks.
///
/// [`add`](Self::add) accumulates into the tick in progress;
/// [`close_tick`](Self::close_tick) seals it. [`rate`](Self::rate) counts
/// the in-progress tick too, so a mid-tick query is never stale.
#[derive(Debug, Clone)]
struct ThroughputWindow {
    sealed: VecDeque<u64>,
    window: usize,
    sealed_total: u64,
    current: u64,
}

impl ThroughputWindow {
    fn new(window: usize) -> Self {
        assert!(window > 0, "throughput window must span at least one tick");
        Self {
            sealed: VecDeque::with_capacity(window),
            window,
            sealed_total: 0,
            current: 0,
        }
    }

    fn add(&mut self, count: u64) {
        self.current += count;
    }

    /// Seal the tick in progress, forgetting the oldest sealed tick once
    /// the window is full.
    fn close_tick(&mut self) {
        if self.sealed.len() == self.window
            && let Some(oldest) = self.sealed.pop_front()
        {
            self.sealed_total -= oldest;
        }
        self.sealed.push_back(self.current);
        self.sealed_total += self.current;
        self.current = 0;
    }

    /// Average drops per tick across the sealed window plus the tick in
    /// progress.
    fn rate(&self) -> Fixed64 {
        let ticks = self.sealed.len() + usize::from(self.current > 0);
        if ticks == 0 {
            return Fixed64::ZERO;
        }
        Fixed64::from_num(self.sealed_total + self.current)
            / Fixed64::from_num(ticks as u64)
    }
}

// ---------------------------------------------------------------------------
// LineStats
// ---------------------------------------------------------------------------

/// Aggregated line metrics fed by core events.
#[derive(Debug, Clone)]
pub struct LineStats {
    total_fed: u64,
    total_delivered: u64,
    delivered_by_code: HashMap<Code, u64>,
    pickups_by_code: HashMap<Code, u64>,
    products_by_station: HashMap<usize, u64>,
    builds_completed: u64,
    products_dropped: u64,
    production_window: ThroughputWindow,
    rate_history: RateHistory,
    ticks_observed: u64,
}

impl LineStats {
    pub fn new(config: StatsConfig) -> Self {
        Self {
            total_fed: 0,
            total_delivered: 0,
            delivered_by_code: HashMap::new(),
            pickups_by_code: HashMap::new(),
            products_by_station: HashMap::new(),
            builds_completed: 0,
            products_dropped: 0,
            production_window: ThroughputWindow::new(config.window_size),
            rate_history: RateHistory::new(config.history_capacity),
            ticks_observed: 0,
        }
    }

    /// Fold one simulation event into the running metrics.
    pub fn process_event(&mut self, event: &Event) {
        match *event {
            Event::CodeFed { .. } => {
                self.total_fed += 1;
            }
            Event::CodeDelivered { code, .. } => {
                self.total_delivered += 1;
                *self.delivered_by_code.entry(code).or_insert(0) += 1;
            }
            Event::PickupStarted { code, .. } => {
                *self.pickups_by_code.entry(code).or_insert(0) += 1;
            }
            Event::BuildStarted { .. } => {}
            Event::BuildCompleted { .. } => {
                self.builds_completed += 1;
            }
            Event::ProductDropped { station, .. } => {
                self.products_dropped += 1;
                *self.products_by_station.entry(station).or_insert(0) += 1;
                self.production_window.add(1);
            }
        }
    }

    /// Close out the current tick: seal the rolling window and record a
    /// rate sample.
    pub fn end_tick(&mut self) {
        self.production_window.close_tick();
        self.rate_history.push(self.production_window.rate());
        self.ticks_observed += 1;
    }

    // -- Queries ------------------------------------------------------------

    pub fn total_fed(&self) -> u64 {
        self.total_fed
    }

    pub fn total_delivered(&self) -> u64 {
        self.total_delivered
    }

    pub fn builds_completed(&self) -> u64 {
        self.builds_completed
    }

    pub fn products_dropped(&self) -> u64 {
        self.products_dropped
    }

    pub fn ticks_observed(&self) -> u64 {
        self.ticks_observed
    }

    /// Products dropped by the given station over the whole run.
    pub fn station_products(&self, station: usize) -> u64 {
        self.products_by_station.get(&station).copied().unwrap_or(0)
    }

    /// Pick-ups of the given component code over the whole run.
    pub fn pickups_of(&self, code: Code) -> u64 {
        self.pickups_by_code.get(&code).copied().unwrap_or(0)
    }

    /// Deliveries of the given code over the whole run.
    pub fn delivered_of(&self, code: Code) -> u64 {
        self.delivered_by_code.get(&code).copied().unwrap_or(0)
    }

    /// Rolling production rate in products per tick.
    pub fn production_rate(&self) -> Fixed64 {
        self.production_window.rate()
    }

    /// Historical rate samples, oldest to newest.
    pub fn rate_history(&self) -> &RateHistory {
        &self.rate_history
    }

    /// Share of delivered codes equal to `code`, in [0, 1].
    pub fn delivered_share(&self, code: Code) -> Fixed64 {
        if self.total_delivered == 0 {
            return Fixed64::ZERO;
        }
        Fixed64::from_num(self.delivered_of(code))
            / Fixed64::from_num(self.total_delivered)
    }
}

impl Default for LineStats {
    fn default() -> Self {
        Self::new(StatsConfig::default())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fx(v: f64) -> Fixed64 {
        Fixed64::from_num(v)
    }

    fn dropped(station: usize, tick: u64) -> Event {
        Event::ProductDropped {
            station,
            side: 0,
            tick,
        }
    }

    // -----------------------------------------------------------------------
    // RateHistory
    // -----------------------------------------------------------------------

    #[test]
    fn rate_history_discards_oldest_at_capacity() {
        let mut history = RateHistory::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            history.push(fx(v));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.capacity(), 3);
        let samples: Vec<Fixed64> = history.iter().collect();
        assert_eq!(samples, vec![fx(2.0), fx(3.0), fx(4.0)]);
        assert_eq!(history.latest(), Some(fx(4.0)));
    }

    #[test]
    fn rate_history_average_ignores_unused_capacity() {
        let mut history = RateHistory::new(8);
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
        assert_eq!(history.average(), Fixed64::ZERO);

        history.push(fx(0.5));
        history.push(fx(1.5));
        assert_eq!(history.average(), fx(1.0));
    }

    #[test]
    #[should_panic(expected = "at least one sample")]
    fn rate_history_rejects_zero_capacity() {
        let _ = RateHistory::new(0);
    }

    // -----------------------------------------------------------------------
    // Throughput window
    // -----------------------------------------------------------------------

    #[test]
    fn window_rate_tracks_recent_ticks_only() {
        let mut window = ThroughputWindow::new(2);
        window.add(4);
        window.close_tick();
        window.add(2);
        window.close_tick();
        assert_eq!(window.rate(), fx(3.0));

        // An idle tick pushes the 4-drop tick out of the window.
        window.close_tick();
        assert_eq!(window.rate(), fx(1.0));
    }

    #[test]
    fn window_rate_sees_the_open_tick() {
        let mut window = ThroughputWindow::new(4);
        assert_eq!(window.rate(), Fixed64::ZERO);
        window.add(2);
        assert_eq!(window.rate(), fx(2.0));
    }

    // -----------------------------------------------------------------------
    // LineStats
    // -----------------------------------------------------------------------

    #[test]
    fn counts_products_per_station() {
        let mut stats = LineStats::default();
        stats.process_event(&dropped(0, 6));
        stats.process_event(&dropped(0, 8));
        stats.process_event(&dropped(1, 11));
        stats.end_tick();

        assert_eq!(stats.products_dropped(), 3);
        assert_eq!(stats.station_products(0), 2);
        assert_eq!(stats.station_products(1), 1);
        assert_eq!(stats.station_products(2), 0);
    }

    #[test]
    fn tracks_fed_delivered_and_pickups() {
        let mut stats = LineStats::default();
        stats.process_event(&Event::CodeFed {
            code: Code::COMPONENT_A,
            tick: 0,
        });
        stats.process_event(&Event::CodeDelivered {
            code: Code::EMPTY,
            tick: 0,
        });
        stats.process_event(&Event::PickupStarted {
            station: 0,
            side: 0,
            code: Code::COMPONENT_A,
            tick: 0,
        });
        stats.end_tick();

        assert_eq!(stats.total_fed(), 1);
        assert_eq!(stats.total_delivered(), 1);
        assert_eq!(stats.pickups_of(Code::COMPONENT_A), 1);
        assert_eq!(stats.pickups_of(Code::COMPONENT_B), 0);
        assert_eq!(stats.delivered_of(Code::EMPTY), 1);
        assert_eq!(stats.delivered_share(Code::EMPTY), fx(1.0));
    }

    #[test]
    fn production_rate_over_window() {
        let config = StatsConfig {
            window_size: 4,
            history_capacity: 16,
        };
        let mut stats = LineStats::new(config);

        // One product every other tick for 4 ticks.
        for tick in 0..4u64 {
            if tick % 2 == 0 {
                stats.process_event(&dropped(0, tick));
            }
            stats.end_tick();
        }

        assert_eq!(stats.production_rate(), fx(0.5));
        assert_eq!(stats.ticks_observed(), 4);
        assert_eq!(stats.rate_history().len(), 4);
    }

    #[test]
    fn delivered_share_of_unseen_code_is_zero() {
        let stats = LineStats::default();
        assert_eq!(stats.delivered_share(Code::PRODUCT), Fixed64::ZERO);
    }
}
