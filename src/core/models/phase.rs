//! Verification phases
//!
//! A request passes through four fixed phases. Each phase has a minimum score
//! that an attempt must reach before the request moves on.

use serde::{Deserialize, Serialize};

/// One of the four verification phases (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Phase(u8);

impl Phase {
    /// Initial regulator review
    pub const INITIAL_REVIEW: Self = Self(1);
    /// Regulator review before forwarding to the target institution
    pub const REGULATOR_REVIEW: Self = Self(2);
    /// Review by the target institution
    pub const INSTITUTION_REVIEW: Self = Self(3);
    /// Final regulator sign-off
    pub const FINAL_REVIEW: Self = Self(4);

    /// All phases in order
    pub const ALL: [Self; 4] = [
        Self::INITIAL_REVIEW,
        Self::REGULATOR_REVIEW,
        Self::INSTITUTION_REVIEW,
        Self::FINAL_REVIEW,
    ];

    /// Create a phase from its number, if it is in 1-4
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        match number {
            1..=4 => Some(Self(number)),
            _ => None,
        }
    }

    /// The phase number
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Minimum score required to pass this phase
    #[must_use]
    pub const fn threshold(self) -> u8 {
        match self.0 {
            1 => 70,
            2 => 75,
            3 => 80,
            _ => 85,
        }
    }

    /// The phase a request moves to after passing this one
    ///
    /// The final phase is its own successor.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.0 >= 4 { self } else { Self(self.0 + 1) }
    }

    /// Whether this is the last phase
    #[must_use]
    pub const fn is_final(self) -> bool {
        self.0 == 4
    }

    /// Whether this phase is handled by the target institution rather than the regulator
    #[must_use]
    pub const fn is_institution_phase(self) -> bool {
        self.0 == 3
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::INITIAL_REVIEW
    }
}

impl TryFrom<u8> for Phase {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("Invalid phase: {value}. Use: 1, 2, 3, 4"))
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> Self {
        phase.0
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid phase: {s}. Use: 1, 2, 3, 4"))?;
        Self::try_from(number)
    }
}
