use static_aabb2d_index as aabb_index;

/// Control flow for visitor callbacks, lets a visitor stop a scan as soon as it has its answer.
///
/// # Examples
///
/// ```
/// # use polyclip::core::*;
/// # use polyclip::polygon::*;
/// # use polyclip::polygon;
/// // figure eight, two edges cross at (1, 1)
/// let bowtie: SimplePolygon = polygon![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)];
/// let mut visited = 0;
/// bowtie.visit_self_intersects(&mut |_intr| {
///     visited += 1;
///     Control::Break(())
/// });
/// assert_eq!(visited, 1);
/// ```
pub trait ControlFlow {
    /// State that tells the caller to keep visiting.
    fn continuing() -> Self;

    /// `true` if the caller should stop visiting.
    fn should_break(&self) -> bool;
}

impl<C> ControlFlow for C
where
    C: aabb_index::ControlFlow,
{
    #[inline]
    fn continuing() -> Self {
        C::continuing()
    }

    #[inline]
    fn should_break(&self) -> bool {
        self.should_break()
    }
}
