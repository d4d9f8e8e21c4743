//! Linear payoff model over a strike grid.
//!
//! P&L at expiry is the signed distance between strike and target, and the
//! "current" P&L scales it linearly by the days left out of a 30 day window.
//! There is no volatility or time value here.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::GridConfig;
use crate::error::{PayoffError, Result};

pub const MAX_EXPIRY_DAYS: u32 = 30;

/// Largest strike count `StrikeSeries::range` will generate.
pub const MAX_STRIKES: usize = 100_000;

/// Ascending, non-empty strike sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct StrikeSeries {
    strikes: Vec<f64>,
}

impl StrikeSeries {
    /// Inclusive range: `start, start + step, ...` up to and including `end`
    /// when `end` lies on the grid.
    pub fn range(start: f64, end: f64, step: f64) -> Result<Self> {
        if !(step > 0.0) || !step.is_finite() {
            return Err(PayoffError::invalid_argument(format!(
                "strike step must be positive, got {}",
                step
            )));
        }
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(PayoffError::invalid_argument(format!(
                "empty strike range [{}, {}]",
                start, end
            )));
        }

        let count = ((end - start) / step + 1e-9).floor() + 1.0;
        if count > MAX_STRIKES as f64 {
            return Err(PayoffError::invalid_argument(format!(
                "strike range [{}, {}] with step {} exceeds {} strikes",
                start, end, step, MAX_STRIKES
            )));
        }

        // index-based so the grid does not drift from repeated additions
        let count = count as usize;
        Self::from_vec((0..count).map(|i| start + step * i as f64).collect())
    }

    pub fn from_grid(grid: &GridConfig) -> Result<Self> {
        Self::range(grid.start, grid.end, grid.step)
    }

    pub fn from_vec(strikes: Vec<f64>) -> Result<Self> {
        if strikes.is_empty() {
            return Err(PayoffError::invalid_argument("strike series is empty"));
        }
        if strikes.iter().any(|s| !s.is_finite()) {
            return Err(PayoffError::invalid_argument("strike series has a non-finite value"));
        }
        if strikes.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PayoffError::invalid_argument(
                "strike series must be strictly ascending",
            ));
        }

        Ok(Self { strikes })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.strikes
    }

    pub fn len(&self) -> usize {
        self.strikes.len()
    }
}

/// Days left until expiry, always within `[0, 30]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpiryDays(u32);

impl ExpiryDays {
    pub fn new(days: i64) -> Result<Self> {
        if days < 0 || days > MAX_EXPIRY_DAYS as i64 {
            return Err(PayoffError::invalid_argument(format!(
                "expiry days must be in [0, {}], got {}",
                MAX_EXPIRY_DAYS, days
            )));
        }
        Ok(Self(days as u32))
    }

    /// Calendar days from `as_of` until `expiry`.
    pub fn until(expiry: NaiveDate, as_of: NaiveDate) -> Result<Self> {
        Self::new((expiry - as_of).num_days())
    }

    pub fn days(self) -> u32 {
        self.0
    }

    /// Share of the 30 day window still left.
    pub fn time_factor(self) -> f64 {
        self.0 as f64 / MAX_EXPIRY_DAYS as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffPoint {
    pub strike: f64,
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayoffCurve {
    points: Vec<PayoffPoint>,
}

impl PayoffCurve {
    pub fn points(&self) -> &[PayoffPoint] {
        &self.points
    }

    pub fn pnl_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.pnl).collect()
    }
}

/// Expiry-day and time-scaled P&L curves for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Payoff {
    pub target: f64,
    pub expiry_days: ExpiryDays,
    pub expiry: PayoffCurve,
    pub current: PayoffCurve,
}

pub fn expiry_pnl(strike: f64, target: f64) -> f64 {
    (strike - target).max(0.0) - (target - strike).max(0.0)
}

pub fn calculate_pnl(strikes: &StrikeSeries, target: f64, expiry_days: ExpiryDays) -> Result<Payoff> {
    if !target.is_finite() {
        return Err(PayoffError::invalid_argument(format!(
            "target price must be finite, got {}",
            target
        )));
    }

    let factor = expiry_days.time_factor();

    let mut expiry = Vec::with_capacity(strikes.len());
    let mut current = Vec::with_capacity(strikes.len());
    for &strike in strikes.as_slice() {
        let pnl = expiry_pnl(strike, target);
        expiry.push(PayoffPoint { strike, pnl });
        current.push(PayoffPoint {
            strike,
            pnl: pnl * factor,
        });
    }

    Ok(Payoff {
        target,
        expiry_days,
        expiry: PayoffCurve { points: expiry },
        current: PayoffCurve { points: current },
    })
}

/// P&L figures at the strike closest to the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readout {
    pub target_price: f64,
    pub closest_strike: f64,
    pub expiry_days: ExpiryDays,
    pub current_pnl: f64,
    pub expiry_pnl: f64,
}

impl Payoff {
    pub fn strikes(&self) -> Vec<f64> {
        self.expiry.points.iter().map(|p| p.strike).collect()
    }

    /// Index of the strike nearest to the target; ties go to the lower strike.
    pub fn closest_index(&self) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, point) in self.expiry.points.iter().enumerate() {
            let distance = (point.strike - self.target).abs();
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best
    }

    pub fn readout(&self) -> Readout {
        let index = self.closest_index();
        Readout {
            target_price: self.target,
            closest_strike: self.expiry.points[index].strike,
            expiry_days: self.expiry_days,
            current_pnl: self.current.points[index].pnl,
            expiry_pnl: self.expiry.points[index].pnl,
        }
    }
}
