//! Simulated live feed: re-runs the payoff every tick with a jittered target.

use std::error::Error;
use std::thread;
use std::time::Duration;

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{StreamArgs, STRIKE_GRID};
use crate::error::{PayoffError, Result};
use crate::payoff::{calculate_pnl, ExpiryDays, Readout, StrikeSeries};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame {
    pub tick: usize,
    pub target: i64,
    pub readout: Readout,
}

pub struct LiveFeed<R: Rng> {
    strikes: StrikeSeries,
    base_target: i64,
    expiry_days: ExpiryDays,
    jitter: i64,
    rng: R,
    history: Vec<Frame>,
}

impl<R: Rng> LiveFeed<R> {
    pub fn new(
        strikes: StrikeSeries,
        base_target: i64,
        expiry_days: ExpiryDays,
        jitter: i64,
        rng: R,
    ) -> Result<Self> {
        if jitter < 0 {
            return Err(PayoffError::invalid_argument(format!(
                "jitter must not be negative, got {}",
                jitter
            )));
        }

        Ok(Self {
            strikes,
            base_target,
            expiry_days,
            jitter,
            rng,
            history: Vec::new(),
        })
    }

    pub fn tick(&mut self) -> Result<Frame> {
        let offset = self.rng.gen_range(-self.jitter..=self.jitter);
        let target = self.base_target.checked_add(offset).ok_or_else(|| {
            PayoffError::invalid_argument(format!(
                "target {} moved by {} is out of range",
                self.base_target, offset
            ))
        })?;
        let payoff = calculate_pnl(&self.strikes, target as f64, self.expiry_days)?;

        let frame = Frame {
            tick: self.history.len(),
            target,
            readout: payoff.readout(),
        };
        self.history.push(frame);

        Ok(frame)
    }

    pub fn history(&self) -> &[Frame] {
        &self.history
    }
}

impl LiveFeed<StdRng> {
    pub fn from_args(args: &StreamArgs) -> Result<Self> {
        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let expiry_days = match args.expiry_date {
            Some(date) => ExpiryDays::until(date, Local::now().date_naive())?,
            None => ExpiryDays::new(args.expiry_days)?,
        };
        Self::new(
            StrikeSeries::from_grid(&STRIKE_GRID)?,
            args.target,
            expiry_days,
            args.jitter,
            rng,
        )
    }
}

pub fn run(args: StreamArgs) -> std::result::Result<(), Box<dyn Error>> {
    let mut feed = LiveFeed::from_args(&args)?;
    let interval = Duration::from_millis(args.interval_ms);

    log::info!(
        "streaming {} ticks around target {} (jitter {}, {} days to expiry)",
        args.iterations,
        args.target,
        args.jitter,
        feed.expiry_days.days()
    );

    for i in 0..args.iterations {
        let frame = feed.tick()?;
        log::debug!("tick {}: target {}", frame.tick, frame.target);
        println!("{}", serde_json::to_string(&frame)?);

        if i + 1 < args.iterations {
            thread::sleep(interval);
        }
    }

    log::info!("stream finished after {} ticks", feed.history().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn feed(seed: u64, jitter: i64) -> LiveFeed<StdRng> {
        LiveFeed::new(
            StrikeSeries::from_grid(&STRIKE_GRID).unwrap(),
            23721,
            ExpiryDays::new(1).unwrap(),
            jitter,
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn targets_stay_within_jitter() {
        let mut feed = feed(7, 50);
        for _ in 0..200 {
            let frame = feed.tick().unwrap();
            assert!((23671..=23771).contains(&frame.target));
            assert_eq!(frame.readout.target_price, frame.target as f64);
            assert_eq!(frame.readout.expiry_days.days(), 1);
        }
        assert_eq!(feed.history().len(), 200);
        assert_eq!(feed.history()[199].tick, 199);
    }

    #[test]
    fn same_seed_same_feed() {
        let mut a = feed(42, 100);
        let mut b = feed(42, 100);
        for _ in 0..20 {
            assert_eq!(a.tick().unwrap().target, b.tick().unwrap().target);
        }
    }

    #[test]
    fn zero_jitter_holds_the_target() {
        let mut feed = feed(1, 0);
        let frame = feed.tick().unwrap();
        assert_eq!(frame.target, 23721);
        assert_eq!(frame.readout.closest_strike, 23700.0);
        assert_eq!(frame.readout.expiry_pnl, -21.0);
    }

    #[test]
    fn target_overflow_is_an_invalid_argument() {
        let mut feed = LiveFeed::new(
            StrikeSeries::from_grid(&STRIKE_GRID).unwrap(),
            i64::MAX,
            ExpiryDays::new(1).unwrap(),
            1,
            StdRng::seed_from_u64(3),
        )
        .unwrap();

        let mut rejected = 0;
        for _ in 0..200 {
            match feed.tick() {
                Ok(frame) => assert!(frame.target >= i64::MAX - 1),
                Err(PayoffError::InvalidArgument(_)) => rejected += 1,
            }
        }
        assert!(rejected > 0);
        assert_eq!(feed.history().len(), 200 - rejected);
    }

    #[test]
    fn negative_jitter_is_rejected() {
        let result = LiveFeed::new(
            StrikeSeries::from_grid(&STRIKE_GRID).unwrap(),
            23721,
            ExpiryDays::new(1).unwrap(),
            -1,
            StdRng::seed_from_u64(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn run_prints_every_tick_without_waiting() {
        let args = StreamArgs {
            target: 22000,
            expiry_days: 30,
            expiry_date: None,
            iterations: 3,
            interval_ms: 0,
            jitter: 10,
            seed: Some(3),
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn expiry_date_in_the_past_is_rejected() {
        let args = StreamArgs {
            target: 22000,
            expiry_days: 1,
            expiry_date: NaiveDate::from_ymd_opt(2000, 1, 1),
            iterations: 1,
            interval_ms: 0,
            jitter: 0,
            seed: Some(0),
        };
        assert!(LiveFeed::from_args(&args).is_err());
    }
}
