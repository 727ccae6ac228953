//! Tax and total computation for the booking cart.
//!
//! All arithmetic is integer: the rate is held in basis points and the
//! rounding rule is explicit, so totals are reproducible to the unit.

use serde::Serialize;

/// Basis points in one whole (100%).
const BASIS_POINTS: u64 = 10_000;

/// How fractional tax amounts are rounded to whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Halves round up (away from zero): 0.5 -> 1.
    #[default]
    HalfUp,
    /// Halves round to the nearest even unit: 0.5 -> 0, 1.5 -> 2.
    HalfEven,
}

/// Tax configuration for the cart.
///
/// The default is a 12% rate with half-up rounding. Both are assumptions
/// about the checkout, not confirmed business rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPolicy {
    /// Tax rate in basis points (1200 = 12%).
    pub rate_basis_points: u64,

    /// Rounding rule for the tax amount.
    pub rounding: Rounding,
}

impl TaxPolicy {
    /// Create a policy with the given rate and rounding.
    pub fn new(rate_basis_points: u64, rounding: Rounding) -> Self {
        Self {
            rate_basis_points,
            rounding,
        }
    }

    /// Set the rounding rule.
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Tax due on `subtotal`, rounded per the policy.
    pub fn taxes_on(&self, subtotal: u64) -> u64 {
        let scaled = subtotal as u128 * self.rate_basis_points as u128;
        let bp = BASIS_POINTS as u128;
        let whole = scaled / bp;
        let remainder = scaled % bp;
        let half = bp / 2;

        let round_up = match self.rounding {
            Rounding::HalfUp => remainder >= half,
            Rounding::HalfEven => remainder > half || (remainder == half && whole % 2 == 1),
        };

        (whole + u128::from(round_up)) as u64
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            rate_basis_points: 1200, // 12% GST
            rounding: Rounding::HalfUp,
        }
    }
}

/// Subtotal, taxes and grand total for a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: u64,
    pub taxes: u64,
    pub total: u64,
}

impl CartTotals {
    /// Compute totals for a subtotal under the given policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_server::selection::{CartTotals, TaxPolicy};
    ///
    /// let totals = CartTotals::compute(34200, &TaxPolicy::default());
    /// assert_eq!(totals.taxes, 4104);
    /// assert_eq!(totals.total, 38304);
    /// ```
    pub fn compute(subtotal: u64, policy: &TaxPolicy) -> Self {
        let taxes = policy.taxes_on(subtotal);
        Self {
            subtotal,
            taxes,
            total: subtotal + taxes,
        }
    }
}
