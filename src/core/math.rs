//! Closed-form annuity algebra and the bounded month-by-month balance
//! recurrence every calculator is built on.

use super::types::ContributionTiming;

/// An annual percentage together with the monthly rate derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSpec {
    pub annual_percent: f64,
    pub monthly: f64,
}

impl RateSpec {
    /// Compounding conversion, used by the investment calculators.
    pub fn effective(annual_percent: f64) -> Self {
        Self {
            annual_percent,
            monthly: monthly_rate(annual_percent),
        }
    }

    /// Simple division by twelve, the way loan rates are quoted.
    pub fn nominal(annual_percent: f64) -> Self {
        Self {
            annual_percent,
            monthly: nominal_monthly_rate(annual_percent),
        }
    }
}

pub fn monthly_rate(annual_percent: f64) -> f64 {
    if annual_percent == 0.0 {
        return 0.0;
    }
    (1.0 + annual_percent / 100.0).powf(1.0 / 12.0) - 1.0
}

pub fn nominal_monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 12.0 / 100.0
}

/// Level payment that amortizes `principal` over `periods` at `rate`.
pub fn annuity_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    if rate == 0.0 {
        return principal / periods as f64;
    }
    let growth = (1.0 + rate).powi(periods as i32);
    principal * rate * growth / (growth - 1.0)
}

pub fn present_value_of_annuity(payment: f64, rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return payment * periods as f64;
    }
    payment * (1.0 - (1.0 + rate).powi(-(periods as i32))) / rate
}

/// Largest level withdrawal `balance` supports for exactly `periods` months.
pub fn sustainable_payment(balance: f64, rate: f64, periods: u32) -> f64 {
    annuity_payment(balance, rate, periods)
}

/// Value after `periods` months of a unit deposit made at the end of each
/// month.
pub fn future_value_factor(rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return periods as f64;
    }
    ((1.0 + rate).powi(periods as i32) - 1.0) / rate
}

pub fn deflate(amount: f64, monthly_inflation: f64, month: u32) -> f64 {
    if monthly_inflation == 0.0 {
        return amount;
    }
    amount / (1.0 + monthly_inflation).powi(month as i32)
}

/// `numerator / denominator * 100`, or zero when the denominator is zero.
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator * 100.0
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Crossing {
    /// Balance at or above the target.
    Rising,
    /// Balance at or below the target.
    Falling,
}

impl Crossing {
    fn reached(self, balance: f64, target: f64) -> bool {
        match self {
            Crossing::Rising => balance >= target,
            Crossing::Falling => balance <= target,
        }
    }
}

/// Balance recurrence stopped after `cap` months. End-of-month timing is
/// `b <- b * (1 + rate) + flow`; start-of-month adds the flow before growth.
#[derive(Debug, Clone, Copy)]
pub struct ForwardRun {
    pub initial_balance: f64,
    pub monthly_rate: f64,
    pub monthly_flow: f64,
    pub timing: ContributionTiming,
    pub cap: u32,
}

impl ForwardRun {
    pub fn balances(self) -> ForwardBalances {
        ForwardBalances {
            run: self,
            month: 0,
            balance: self.initial_balance,
        }
    }

    /// First month at which the balance crosses `target`; month 0 counts.
    pub fn months_until(self, target: f64, crossing: Crossing) -> Option<u32> {
        self.months_until_moving(|_| target, crossing)
    }

    /// Like [`ForwardRun::months_until`], with the target re-evaluated for
    /// every month.
    pub fn months_until_moving<F>(self, target_at: F, crossing: Crossing) -> Option<u32>
    where
        F: Fn(u32) -> f64,
    {
        if crossing.reached(self.initial_balance, target_at(0)) {
            return Some(0);
        }
        self.balances()
            .find(|&(month, balance)| crossing.reached(balance, target_at(month)))
            .map(|(month, _)| month)
    }
}

/// Yields `(month, balance)` for months `1..=cap`.
#[derive(Debug, Clone)]
pub struct ForwardBalances {
    run: ForwardRun,
    month: u32,
    balance: f64,
}

impl Iterator for ForwardBalances {
    type Item = (u32, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.month >= self.run.cap {
            return None;
        }
        self.month += 1;
        let growth = 1.0 + self.run.monthly_rate;
        self.balance = match self.run.timing {
            ContributionTiming::StartOfMonth => (self.balance + self.run.monthly_flow) * growth,
            ContributionTiming::EndOfMonth => self.balance * growth + self.run.monthly_flow,
        };
        Some((self.month, self.balance))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.run.cap - self.month) as usize;
        (remaining, Some(remaining))
    }
}
