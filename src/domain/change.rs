//! Classification of a freshly fetched balance against the stored one.

use rust_decimal::Decimal;

/// What a newly observed balance means for a watched wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceChange {
    /// First observation: the amount becomes the baseline.
    Initial { amount: Decimal },
    /// The amount moved since the last observation.
    Changed { amount: Decimal, delta: Decimal },
}

impl BalanceChange {
    /// Compare a fetched amount with the stored one.
    ///
    /// Both values are normalized before comparison. Returns `None` when the
    /// amount is unchanged. A difference outside the `Decimal` range has no
    /// delta, so the amount is reported as a new baseline.
    #[must_use]
    pub fn classify(last: Option<Decimal>, fetched: Decimal) -> Option<Self> {
        let amount = fetched.normalize();
        match last {
            None => Some(Self::Initial { amount }),
            Some(last) if last == amount => None,
            Some(last) => match amount.checked_sub(last) {
                Some(delta) => Some(Self::Changed {
                    amount,
                    delta: delta.normalize(),
                }),
                None => Some(Self::Initial { amount }),
            },
        }
    }

    /// The amount that should be stored after this observation.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        match self {
            Self::Initial { amount } | Self::Changed { amount, .. } => *amount,
        }
    }

    #[must_use]
    pub const fn delta(&self) -> Option<Decimal> {
        match self {
            Self::Initial { .. } => None,
            Self::Changed { delta, .. } => Some(*delta),
        }
    }
}
