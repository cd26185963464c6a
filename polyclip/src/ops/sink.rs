use super::{Operation, OperationResult, ResultEntry};
use crate::{core::traits::Real, polygon::SimplePolygon};
use std::convert::Infallible;

/// Provides the input polygons of a batch, from whatever storage format is in use.
pub trait PolygonSource<T>
where
    T: Real,
{
    type Error;

    fn polygons(&mut self) -> Result<Vec<SimplePolygon<T>>, Self::Error>;
}

impl<T> PolygonSource<T> for Vec<SimplePolygon<T>>
where
    T: Real,
{
    type Error = Infallible;

    #[inline]
    fn polygons(&mut self) -> Result<Vec<SimplePolygon<T>>, Self::Error> {
        Ok(std::mem::take(self))
    }
}

/// Receives every entry of an operation result, responsible for any output (printing,
/// persisting, rendering).
pub trait ResultSink<T>
where
    T: Real,
{
    type Error;

    /// Accept the entry at `index` of the result of `operation`. Empty entries
    /// ([ResultEntry::is_empty]) are delivered too.
    fn accept(
        &mut self,
        operation: Operation,
        index: usize,
        entry: &ResultEntry<T>,
    ) -> Result<(), Self::Error>;
}

/// Hands every entry of `result` to `sink` in result order, stopping at the first sink error.
///
/// # Examples
///
/// ```
/// # use polyclip::polygon;
/// # use polyclip::polygon::*;
/// # use polyclip::ops::*;
/// struct Count(usize);
///
/// impl ResultSink<f64> for Count {
///     type Error = ();
///     fn accept(&mut self, _: Operation, _: usize, _: &ResultEntry<f64>) -> Result<(), ()> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
///
/// let polygons: Vec<SimplePolygon> = vec![
///     polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
///     polygon![(5.0, 0.0), (6.0, 0.0), (6.0, 1.0), (5.0, 1.0)],
/// ];
/// let result = run(Operation::Intersection, &polygons, &Default::default()).unwrap();
/// let mut sink = Count(0);
/// deliver(&result, &mut sink).unwrap();
/// // the disjoint pair is delivered as one empty entry
/// assert_eq!(sink.0, 1);
/// ```
pub fn deliver<T, S>(result: &OperationResult<T>, sink: &mut S) -> Result<(), S::Error>
where
    T: Real,
    S: ResultSink<T> + ?Sized,
{
    for (index, entry) in result.entries.iter().enumerate() {
        sink.accept(result.operation, index, entry)?;
    }

    Ok(())
}
