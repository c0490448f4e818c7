use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// Signed DIMACS literal: `v` is the positive and `-v` the negative literal of variable `v`.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Lit(i32);

impl Lit {
    pub const fn new(val: i32) -> Self {
        debug_assert!(val != 0, "literal must not be zero");
        Lit(val)
    }

    /// Literal of the given 1-based variable with the given polarity.
    pub const fn from_var(var: u32, polarity: bool) -> Self {
        let val = var as i32;
        if polarity {
            Self::new(val)
        } else {
            Self::new(-val)
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// 1-based variable index.
    pub const fn var(self) -> u32 {
        self.get().unsigned_abs()
    }

    /// `true` for a positive literal.
    pub const fn polarity(self) -> bool {
        self.get() > 0
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl<L> From<&L> for Lit
where
    L: Into<Lit> + Copy,
{
    fn from(val: &L) -> Self {
        (*val).into()
    }
}

impl From<i32> for Lit {
    fn from(val: i32) -> Self {
        Self::new(val)
    }
}

// Into<i32>
impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.get()
    }
}

// -Lit
impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn test_lit_new() {
        let lit = Lit::new(42);
        assert_eq!(lit.get(), 42);
        assert_eq!(lit.var(), 42);
        assert!(lit.polarity());
    }

    #[test]
    fn test_lit_from_var() {
        assert_eq!(Lit::from_var(7, true).get(), 7);
        assert_eq!(Lit::from_var(7, false).get(), -7);
    }

    #[test]
    fn test_lit_display() {
        assert_eq!(format!("{}", Lit::new(-42)), "-42");
    }

    #[test]
    fn test_lit_from_i32_ref() {
        let lit: Lit = (&42).into();
        assert_eq!(lit.get(), 42);
    }

    #[test]
    fn test_lit_neg() {
        let lit = Lit::new(42);
        let neg_lit = -lit;
        assert_eq!(neg_lit.get(), -42);
        assert_eq!(neg_lit.var(), 42);
        assert!(!neg_lit.polarity());
    }

    #[quickcheck]
    fn prop_neg_keeps_var_and_flips_polarity(val: i32) -> bool {
        if val == 0 || val == i32::MIN {
            return true;
        }
        let lit = Lit::new(val);
        (-lit).var() == lit.var() && (-lit).polarity() != lit.polarity() && -(-lit) == lit
    }
}
