// qnorm_logic
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use anyhow::{anyhow, Result};

/// A variable identifier.
///
/// Variables are numbered from `1`, as in the DIMACS format.
/// It can be obtained from and converted into `usize`.
///
/// # Examples
///
/// ```
/// use qnorm_logic::VarId;
///
/// assert_eq!(3, usize::from(VarId::from(3)))
/// ```
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct VarId(usize);

impl From<usize> for VarId {
    fn from(u: usize) -> Self {
        VarId(u)
    }
}

impl From<VarId> for usize {
    fn from(v: VarId) -> Self {
        v.0
    }
}

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A literal, composed by a [`VarId`] and a `bool` (its polarity).
///
/// In the DIMACS format, a literal is a nonzero signed integer:
/// its absolute value is the variable and its sign is the polarity.
///
/// # Order
///
/// A total order is imposed on literals:
/// * if variable identifiers are not equal, the same order applies to the literals;
/// * if variable identifiers are equal and polarity are different, the polarity (`bool`) order applies;
/// * if variable identifiers and polarity are equals, the two literals are equal.
///
/// # Examples
///
/// ```
/// use qnorm_logic::{VarId, Literal};
///
/// let v = VarId::from(1);
/// let l = Literal::new(v, true);
/// let not_l = Literal::new(v, false);
/// assert_eq!(-1, not_l.to_dimacs());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal(VarId, bool);

impl Literal {
    /// Builds a new literal, given its [`VarId`] and its polarity as a `bool`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qnorm_logic::{VarId, Literal};
    ///
    /// let v = VarId::from(1);
    /// let l = Literal::new(v, true);
    /// let not_l = Literal::new(v, false);
    /// ```
    pub fn new(var_id: VarId, polarity: bool) -> Self {
        Literal(var_id, polarity)
    }

    /// Builds a literal from its DIMACS representation.
    ///
    /// An error is returned for `0`, which is a clause terminator rather than a literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use qnorm_logic::{VarId, Literal};
    ///
    /// assert_eq!(Literal::new(VarId::from(2), false), Literal::from_dimacs(-2).unwrap());
    /// assert!(Literal::from_dimacs(0).is_err());
    /// ```
    pub fn from_dimacs(value: isize) -> Result<Self> {
        match value {
            0 => Err(anyhow!("0 is not a valid literal")),
            v if v > 0 => Ok(Literal(VarId(v as usize), true)),
            v => Ok(Literal(VarId(v.unsigned_abs()), false)),
        }
    }

    /// Returns the DIMACS representation of this literal.
    pub fn to_dimacs(&self) -> isize {
        let v = (self.0).0 as isize;
        if self.1 {
            v
        } else {
            -v
        }
    }

    /// Returns the negation of the literal, as a new `Literal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qnorm_logic::{VarId, Literal};
    ///
    /// let v = VarId::from(1);
    /// let l = Literal::new(v, true);
    /// let not_l = l.negate();
    /// assert_eq!(Literal::new(v, false), not_l)
    /// ```
    pub fn negate(&self) -> Self {
        Literal(self.0, !self.1)
    }

    /// Returns a literal with the same polarity but another variable.
    pub fn with_var_id(&self, var_id: VarId) -> Self {
        Literal(var_id, self.1)
    }

    /// Returns the [`VarId`] of this literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use qnorm_logic::{VarId, Literal};
    ///
    /// let v = VarId::from(1);
    /// let l = Literal::new(v, true);
    /// assert_eq!(v, l.var_id());
    /// ```
    pub fn var_id(&self) -> VarId {
        self.0
    }

    /// Returns the polarity of this literal.
    pub fn polarity(&self) -> bool {
        self.1
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0).then(self.1.cmp(&other.1))
    }
}

impl From<(usize, bool)> for Literal {
    fn from(couple: (usize, bool)) -> Self {
        Literal::new(VarId::from(couple.0), couple.1)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate() {
        let lit = Literal::new(1.into(), false);
        let neg = lit.negate();
        assert!(neg.1);
    }

    #[test]
    fn test_eq() {
        let lit0 = Literal::new(1.into(), false);
        let lit1 = Literal::new(1.into(), false);
        let lit2 = Literal::new(1.into(), true);
        assert_eq!(lit0, lit1);
        assert_ne!(lit0, lit2);
    }

    #[test]
    fn test_dimacs() {
        assert_eq!(Literal::new(3.into(), true), Literal::from_dimacs(3).unwrap());
        assert_eq!(Literal::new(3.into(), false), Literal::from_dimacs(-3).unwrap());
        assert_eq!(-7, Literal::from_dimacs(-7).unwrap().to_dimacs());
        assert_eq!("-7", format!("{}", Literal::from_dimacs(-7).unwrap()));
    }

    #[test]
    fn test_zero_is_not_a_literal() {
        assert_eq!(
            "0 is not a valid literal",
            Literal::from_dimacs(0).unwrap_err().to_string()
        );
    }

    #[test]
    fn test_with_var_id() {
        let lit = Literal::from_dimacs(-4).unwrap();
        assert_eq!(-9, lit.with_var_id(9.into()).to_dimacs());
    }

    #[test]
    fn test_sort() {
        let mut v = vec![
            Literal::new(2.into(), true),
            Literal::new(2.into(), false),
            Literal::new(1.into(), false),
            Literal::new(1.into(), true),
        ];
        v.sort_unstable();
        assert_eq!(
            vec![
                Literal::new(1.into(), false),
                Literal::new(1.into(), true),
                Literal::new(2.into(), false),
                Literal::new(2.into(), true)
            ],
            v
        );
    }
}
