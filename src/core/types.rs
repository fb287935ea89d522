/// A query key taken from the target array S (a scaled mass)
pub type TargetValue = i32;

/// One of the two factor arrays a pair is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The mass array M (sorted ascending)
    M,
    /// The adduct array A (sorted descending)
    A,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::M => write!(f, "M"),
            Self::A => write!(f, "A"),
        }
    }
}

/// Direction a sorted view is ordered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Why a target has no reportable pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPairReason {
    /// M or A has no values at all
    InputEmpty,
    /// No visited pair had a positive sum within the delta ceiling
    NoPositivePair,
}

impl std::fmt::Display for NoPairReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputEmpty => write!(f, "factor array is empty"),
            Self::NoPositivePair => write!(f, "no pair with a positive sum"),
        }
    }
}
