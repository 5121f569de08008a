/// A simplification rule that was applied to an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// `0+a = a`
    AddZero,

    /// `2+3 = 5`
    AddNumbers,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2*3*a = 6a`
    MultiplyNumbers,

    /// `3/12 = 1/4`
    ReduceFraction,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^1 = a`
    PowerOne,

    /// `a^0 = 1`
    PowerZero,

    /// `1^a = 1`
    OneToPower,

    /// `2^3 = 8`
    PowerNumbers,

    /// `(a^2)^3 = a^6`
    PowerOfPower,
}
