//! Building the mappings returned by matching and sub-frame selection.
//!
//! These are always of the form
//! `prefix permutation -> component mappings in parallel -> suffix permutation`,
//! where either permutation may turn out to be a no-op and is then left out.
use std::sync::Arc;

use crate::{Parallel, Permutation, Result, SeriesBuilder, Transformation};

/// Whether a permutation with these maps would leave every coordinate where it is.
///
/// True only if there are as many inputs as outputs
/// and both maps send every axis `i` to `i`.
pub fn is_null_permutation(in_map: &[Option<usize>], out_map: &[Option<usize>]) -> bool {
    in_map.len() == out_map.len()
        && in_map.iter().enumerate().all(|(i, m)| *m == Some(i))
        && out_map.iter().enumerate().all(|(i, m)| *m == Some(i))
}

/// A [Permutation] transformation, or `None` if it would be a no-op.
pub fn permutation_or_identity(
    in_map: &[Option<usize>],
    out_map: &[Option<usize>],
) -> Result<Option<Arc<dyn Transformation>>> {
    if is_null_permutation(in_map, out_map) {
        return Ok(None);
    }
    Ok(Some(Arc::new(Permutation::try_new(in_map, out_map)?)))
}

/// Apply `first`, then `second`.
pub fn compose_serial(
    first: Arc<dyn Transformation>,
    second: Arc<dyn Transformation>,
) -> Result<Arc<dyn Transformation>> {
    let mut builder = SeriesBuilder::with_capacity(2);
    builder.add_arced(first)?.add_arced(second)?;
    Ok(Arc::new(builder.build()?))
}

/// Apply `first` to the leading axes and `second` to the remainder.
pub fn compose_parallel(
    first: Arc<dyn Transformation>,
    second: Arc<dyn Transformation>,
) -> Arc<dyn Transformation> {
    Arc::new(Parallel::new(first, second))
}

/// Chain `prefix`, `inner` and `suffix` into one mapping, skipping absent ends.
pub(crate) fn wrap(
    prefix: Option<Arc<dyn Transformation>>,
    inner: Arc<dyn Transformation>,
    suffix: Option<Arc<dyn Transformation>>,
) -> Result<Arc<dyn Transformation>> {
    if prefix.is_none() && suffix.is_none() {
        return Ok(inner);
    }
    let mut builder = SeriesBuilder::with_capacity(3);
    if let Some(p) = prefix {
        builder.add_arced(p)?;
    }
    builder.add_arced(inner)?;
    if let Some(s) = suffix {
        builder.add_arced(s)?;
    }
    Ok(Arc::new(builder.build()?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{compose_parallel, compose_serial, is_null_permutation, permutation_or_identity, wrap};
    use crate::tests::{assert_points_eq, make_coords, transform};
    use crate::{Error, Identity, Permutation, Transformation, Zoom};

    #[test]
    fn test_null_permutation() {
        assert!(is_null_permutation(&[Some(0), Some(1)], &[Some(0), Some(1)]));
        assert!(is_null_permutation(&[], &[]));
        assert!(!is_null_permutation(&[Some(1), Some(0)], &[Some(1), Some(0)]));
        assert!(!is_null_permutation(&[Some(0), None], &[Some(0), Some(1)]));
        assert!(!is_null_permutation(&[Some(0), Some(1)], &[Some(0)]));
    }

    #[test]
    fn test_permutation_elided() {
        let maps = [Some(0), Some(1), Some(2)];
        assert!(permutation_or_identity(&maps, &maps).unwrap().is_none());
        let swapped = [Some(1), Some(0), Some(2)];
        let t = permutation_or_identity(&swapped, &swapped).unwrap().unwrap();
        assert_eq!(transform(t.as_ref(), &[1.0, 2.0, 3.0]), vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_serial_dimension_mismatch() {
        let err = compose_serial(Arc::new(Identity::new(2)), Arc::new(Identity::new(3)));
        assert!(matches!(err, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_serial_associative() {
        let a: Arc<dyn Transformation> = Arc::new(Zoom::try_new(3, 2.5).unwrap());
        let b: Arc<dyn Transformation> =
            Arc::new(Permutation::from_out_map(3, &[Some(2), Some(0), Some(1), None]).unwrap());
        let c: Arc<dyn Transformation> = compose_parallel(
            Arc::new(Zoom::try_new(2, -0.5).unwrap()),
            Arc::new(Permutation::from_out_map(2, &[Some(1), Some(0)]).unwrap()),
        );

        let left = compose_serial(compose_serial(a.clone(), b.clone()).unwrap(), c.clone()).unwrap();
        let right = compose_serial(a, compose_serial(b, c).unwrap()).unwrap();
        assert_eq!(left.input_ndim(), right.input_ndim());
        assert_eq!(left.output_ndim(), right.output_ndim());

        for pt in make_coords(100, 3, 7).iter() {
            assert_points_eq(&transform(left.as_ref(), pt), &transform(right.as_ref(), pt));
        }
    }

    #[test]
    fn test_wrap() {
        let inner: Arc<dyn Transformation> = Arc::new(Zoom::try_new(2, 3.0).unwrap());
        let same = wrap(None, inner.clone(), None).unwrap();
        assert!(Arc::ptr_eq(&same, &inner));

        let prefix = permutation_or_identity(&[Some(1), Some(0)], &[Some(1), Some(0)]).unwrap();
        let suffix = permutation_or_identity(&[Some(0), None], &[Some(0)]).unwrap();
        let t = wrap(prefix, inner, suffix).unwrap();
        assert_eq!(t.output_ndim(), 1);
        assert_eq!(transform(t.as_ref(), &[1.0, 2.0]), vec![6.0]);
    }
}
