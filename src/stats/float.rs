/// Extension of `num_traits::Float` with the integer casts the analysis
/// code needs.
pub trait Float: num_traits::Float + cast::From<usize, Output = Self> {}

impl Float for f32 {}
impl Float for f64 {}
