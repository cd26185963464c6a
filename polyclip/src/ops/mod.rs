//! Batch operations over a list of input polygons.
//!
//! Intersection and difference are applied to every pair of inputs `(i, j)` with `i < j` in the
//! order `(0, 1), (0, 2), .., (0, n - 1), (1, 2), ..`. Union folds all inputs into one set of
//! regions, one region per connected component.
mod sink;

pub use sink::*;

use crate::{
    boolean::{boolean, BooleanOp, BooleanOptions},
    core::traits::Real,
    error::{BatchError, Result},
    polygon::{validate, Region, SimplePolygon},
};
use std::{fmt, str::FromStr};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operation applied to a batch of polygons.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Union,
    Intersection,
    Difference,
}

impl Operation {
    /// All operations in menu order.
    pub const ALL: [Operation; 3] = [
        Operation::Union,
        Operation::Intersection,
        Operation::Difference,
    ];

    /// Lower case name (`"union"`, `"intersection"`, `"difference"`).
    pub fn name(self) -> &'static str {
        match self {
            Operation::Union => "union",
            Operation::Intersection => "intersection",
            Operation::Difference => "difference",
        }
    }

    /// Capitalized name, used for labeling output (`"Union"`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Operation::Union => "Union",
            Operation::Intersection => "Intersection",
            Operation::Difference => "Difference",
        }
    }

    /// Menu code of the operation (1, 2 or 3).
    pub fn code(self) -> u8 {
        match self {
            Operation::Union => 1,
            Operation::Intersection => 2,
            Operation::Difference => 3,
        }
    }

    pub fn boolean_op(self) -> BooleanOp {
        match self {
            Operation::Union => BooleanOp::Or,
            Operation::Intersection => BooleanOp::And,
            Operation::Difference => BooleanOp::Not,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BatchError;

    /// Parses an operation name (case insensitive) or menu code.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyclip::ops::Operation;
    /// assert_eq!("Union".parse::<Operation>().unwrap(), Operation::Union);
    /// assert_eq!("3".parse::<Operation>().unwrap(), Operation::Difference);
    /// assert!("xor".parse::<Operation>().is_err());
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Operation::ALL
            .iter()
            .copied()
            .find(|op| {
                trimmed.eq_ignore_ascii_case(op.name()) || trimmed == op.code().to_string()
            })
            .ok_or_else(|| BatchError::UnsupportedOperation(s.to_string()))
    }
}

/// One entry of an [OperationResult].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry<T = f64> {
    /// Indexes of the input polygons the entry was computed from: the pair `[i, j]` for
    /// intersection and difference, every input for union.
    pub sources: Vec<usize>,
    /// Produced region, [Region::empty] when the inputs produced no area.
    pub region: Region<T>,
}

impl<T> ResultEntry<T>
where
    T: Real,
{
    /// `true` if the entry holds the empty sentinel region.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }
}

/// Ordered result of running one operation over a batch.
///
/// Every pair (or the union fold) contributes its regions in discovery order, or a single empty
/// entry when it produced nothing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult<T = f64> {
    pub operation: Operation,
    pub entries: Vec<ResultEntry<T>>,
}

impl<T> OperationResult<T>
where
    T: Real,
{
    /// Non empty regions in result order.
    pub fn regions(&self) -> impl Iterator<Item = &Region<T>> + '_ {
        self.entries
            .iter()
            .filter(|e| !e.is_empty())
            .map(|e| &e.region)
    }

    /// Total area of all regions.
    pub fn total_area(&self) -> T {
        self.regions().fold(T::zero(), |acc, r| acc + r.area())
    }
}

/// Checks a batch before any operation runs: at least two polygons must be non empty, then every
/// polygon must pass [validate], checked in input order. The first failure is returned.
///
/// # Examples
///
/// ```
/// # use polyclip::polygon;
/// # use polyclip::polygon::*;
/// # use polyclip::ops::*;
/// # use polyclip::error::*;
/// let square: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// let line: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0)];
/// assert_eq!(
///     validate_batch(&[square.clone()]),
///     Err(BatchError::InsufficientInputs { non_empty: 1 })
/// );
/// assert_eq!(
///     validate_batch(&[square, line]),
///     Err(BatchError::InvalidPolygon {
///         index: 1,
///         source: ValidationError::TooFewVertices { count: 2 }
///     })
/// );
/// ```
pub fn validate_batch<T>(polygons: &[SimplePolygon<T>]) -> Result<()>
where
    T: Real,
{
    let non_empty = polygons.iter().filter(|p| !p.is_empty()).count();
    if non_empty < 2 {
        return Err(BatchError::InsufficientInputs { non_empty });
    }

    for (index, polygon) in polygons.iter().enumerate() {
        validate(polygon).map_err(|source| BatchError::InvalidPolygon { index, source })?;
    }

    Ok(())
}

/// Intersection of every pair of polygons using default options, see
/// [compute_intersection_opt].
#[inline]
pub fn compute_intersection<T>(polygons: &[SimplePolygon<T>]) -> Vec<Region<T>>
where
    T: Real,
{
    compute_intersection_opt(polygons, &Default::default())
}

/// Intersection of every pair of polygons, the regions of all pairs concatenated in pair order.
/// The polygons are expected to have passed [validate_batch].
pub fn compute_intersection_opt<T>(
    polygons: &[SimplePolygon<T>],
    options: &BooleanOptions<T>,
) -> Vec<Region<T>>
where
    T: Real,
{
    pairwise(polygons, BooleanOp::And, options)
        .into_iter()
        .flat_map(|(_, regions)| regions)
        .collect()
}

/// Difference of every pair of polygons using default options, see [compute_difference_opt].
#[inline]
pub fn compute_difference<T>(polygons: &[SimplePolygon<T>]) -> Vec<Region<T>>
where
    T: Real,
{
    compute_difference_opt(polygons, &Default::default())
}

/// Difference `polygons[i] - polygons[j]` of every pair `i < j`, the regions of all pairs
/// concatenated in pair order. The polygons are expected to have passed [validate_batch].
pub fn compute_difference_opt<T>(
    polygons: &[SimplePolygon<T>],
    options: &BooleanOptions<T>,
) -> Vec<Region<T>>
where
    T: Real,
{
    pairwise(polygons, BooleanOp::Not, options)
        .into_iter()
        .flat_map(|(_, regions)| regions)
        .collect()
}

/// Union of all polygons using default options, see [compute_union_opt].
#[inline]
pub fn compute_union<T>(polygons: &[SimplePolygon<T>]) -> Vec<Region<T>>
where
    T: Real,
{
    compute_union_opt(polygons, &Default::default())
}

/// Union of all polygons, folded left to right into a running set of regions. Returns one region
/// per connected component of the union. The polygons are expected to have passed
/// [validate_batch].
///
/// Two components are connected only when they share interior or a boundary segment. Contact at
/// isolated vertexes does not connect them: two L shapes meeting at two corners come back as two
/// regions, and the area they enclose between those corners is not reported as a hole.
pub fn compute_union_opt<T>(
    polygons: &[SimplePolygon<T>],
    options: &BooleanOptions<T>,
) -> Vec<Region<T>>
where
    T: Real,
{
    let mut accumulator: Vec<Region<T>> = Vec::new();
    for (i, polygon) in polygons.iter().enumerate() {
        if polygon.is_empty() {
            continue;
        }

        let lifted = Region::from_polygon(polygon.clone());
        accumulator = boolean(
            &accumulator,
            std::slice::from_ref(&lifted),
            BooleanOp::Or,
            options,
        );
        log::debug!(
            "union fold step {}: {} accumulated regions",
            i,
            accumulator.len()
        );
    }

    accumulator
}

/// Validates `polygons` with [validate_batch] then runs `operation` over them.
///
/// # Examples
///
/// ```
/// # use polyclip::polygon;
/// # use polyclip::polygon::*;
/// # use polyclip::ops::*;
/// let polygons: Vec<SimplePolygon> = vec![
///     polygon![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
///     polygon![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)],
/// ];
/// let result = run(Operation::Intersection, &polygons, &Default::default()).unwrap();
/// assert_eq!(result.entries.len(), 1);
/// assert_eq!(result.entries[0].sources, vec![0, 1]);
/// assert_eq!(result.total_area(), 25.0);
/// ```
pub fn run<T>(
    operation: Operation,
    polygons: &[SimplePolygon<T>],
    options: &BooleanOptions<T>,
) -> Result<OperationResult<T>>
where
    T: Real,
{
    validate_batch(polygons)?;
    log::info!(
        "running {} over {} polygons",
        operation,
        polygons.len()
    );

    let entries = match operation {
        Operation::Union => {
            let sources: Vec<usize> = (0..polygons.len())
                .filter(|&i| !polygons[i].is_empty())
                .collect();
            let regions = compute_union_opt(polygons, options);
            if regions.is_empty() {
                vec![ResultEntry {
                    sources,
                    region: Region::empty(),
                }]
            } else {
                regions
                    .into_iter()
                    .map(|region| ResultEntry {
                        sources: sources.clone(),
                        region,
                    })
                    .collect()
            }
        }
        Operation::Intersection | Operation::Difference => {
            let mut entries = Vec::new();
            for ((i, j), regions) in pairwise(polygons, operation.boolean_op(), options) {
                if regions.is_empty() {
                    log::debug!("no {} among polygons {} and {}", operation, i, j);
                    entries.push(ResultEntry {
                        sources: vec![i, j],
                        region: Region::empty(),
                    });
                    continue;
                }
                entries.extend(regions.into_iter().map(|region| ResultEntry {
                    sources: vec![i, j],
                    region,
                }));
            }
            entries
        }
    };

    Ok(OperationResult { operation, entries })
}

/// Applies `op` to every pair `(i, j)`, `i < j`, results are returned in pair order.
fn pairwise<T>(
    polygons: &[SimplePolygon<T>],
    op: BooleanOp,
    options: &BooleanOptions<T>,
) -> Vec<((usize, usize), Vec<Region<T>>)>
where
    T: Real,
{
    let n = polygons.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .filter(|&(i, j)| !polygons[i].is_empty() && !polygons[j].is_empty())
        .collect();

    let apply = |&(i, j): &(usize, usize)| {
        let a = Region::from_polygon(polygons[i].clone());
        let b = Region::from_polygon(polygons[j].clone());
        ((i, j), boolean(&[a], &[b], op, options))
    };

    #[cfg(feature = "rayon")]
    let results = pairs.par_iter().map(apply).collect();

    #[cfg(not(feature = "rayon"))]
    let results = pairs.iter().map(apply).collect();

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_parsing() {
        assert_eq!("union".parse::<Operation>(), Ok(Operation::Union));
        assert_eq!(" INTERSECTION ".parse::<Operation>(), Ok(Operation::Intersection));
        assert_eq!("Difference".parse::<Operation>(), Ok(Operation::Difference));
        assert_eq!("1".parse::<Operation>(), Ok(Operation::Union));
        assert_eq!("2".parse::<Operation>(), Ok(Operation::Intersection));
        assert_eq!(
            "4".parse::<Operation>(),
            Err(BatchError::UnsupportedOperation("4".to_string()))
        );
        assert_eq!(
            "".parse::<Operation>(),
            Err(BatchError::UnsupportedOperation(String::new()))
        );
    }

    #[test]
    fn operation_names() {
        for op in Operation::ALL {
            assert_eq!(op.to_string().parse::<Operation>(), Ok(op));
            assert_eq!(op.code().to_string().parse::<Operation>(), Ok(op));
        }
        assert_eq!(Operation::Difference.label(), "Difference");
    }

    #[test]
    fn pairs_in_order() {
        let square = |x: f64| -> SimplePolygon {
            polygon![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0)]
        };
        let polygons = vec![square(0.0), square(0.0), square(0.0), square(0.0)];
        let order: Vec<(usize, usize)> = pairwise(&polygons, BooleanOp::And, &Default::default())
            .into_iter()
            .map(|(pair, _)| pair)
            .collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }
}
