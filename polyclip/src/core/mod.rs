//! Core module has the shared scalar traits, vector math and geometric predicates.

use self::traits::ControlFlow;
pub mod math;
pub mod traits;

/// Basic control flow enum returned by visitor callbacks.
#[derive(Debug)]
pub enum Control<B = ()> {
    /// Keep visiting.
    Continue,
    /// Stop visiting and hand a value back.
    Break(B),
}

impl<B> Default for Control<B> {
    #[inline]
    fn default() -> Self {
        Control::Continue
    }
}

impl<B> ControlFlow for Control<B> {
    #[inline]
    fn continuing() -> Self {
        Control::Continue
    }

    #[inline]
    fn should_break(&self) -> bool {
        matches!(*self, Control::Break(_))
    }
}
