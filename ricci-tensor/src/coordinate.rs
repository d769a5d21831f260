use std::fmt::{Display, Formatter, Result};

/// One of the four coordinates of the metric, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coordinate {
    /// Time, index 0.
    T,

    /// Radius, index 1.
    R,

    /// Polar angle, index 2.
    Theta,

    /// Azimuthal angle, index 3.
    Phi,
}

impl Coordinate {
    /// All coordinates, in index order.
    pub const ALL: [Coordinate; 4] = [Self::T, Self::R, Self::Theta, Self::Phi];

    /// Returns the index of the coordinate, from 0 to 3.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the coordinate with the given index, or [`None`] if the index is out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the name of the variable this coordinate is written as in expressions.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::T => "t",
            Self::R => "r",
            Self::Theta => "theta",
            Self::Phi => "phi",
        }
    }

    /// Returns a short name for the coordinate, used in plain-text labels such as `R_thth`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::T => "t",
            Self::R => "r",
            Self::Theta => "th",
            Self::Phi => "ph",
        }
    }

    /// Returns the LaTeX rendering of the coordinate, as used in tensor subscripts.
    pub fn latex(self) -> &'static str {
        match self {
            Self::T => "t",
            Self::R => "r",
            Self::Theta => "\\theta",
            Self::Phi => "\\phi",
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_round_trip() {
        for (i, coordinate) in Coordinate::ALL.into_iter().enumerate() {
            assert_eq!(coordinate.index(), i);
            assert_eq!(Coordinate::from_index(i), Some(coordinate));
        }
        assert_eq!(Coordinate::from_index(4), None);
    }
}
