use std::collections::BTreeSet;

use smallvec::ToSmallVec;

use crate::{Error, Result, ShortVec};

/// A bijection from an external axis numbering to an internal one.
///
/// External axis `i` is stored at internal position `perm[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisPermutation(ShortVec<usize>);

impl AxisPermutation {
    pub fn identity(naxes: usize) -> Self {
        Self((0..naxes).collect())
    }

    /// Fails unless `perm` holds every index in `0..perm.len()` exactly once.
    pub fn try_new(perm: &[usize]) -> Result<Self> {
        let visited: BTreeSet<_> = perm.iter().collect();
        if visited.len() != perm.len() {
            return Err(Error::InvalidPermutation(format!(
                "{perm:?} maps multiple external axes to the same internal axis"
            )));
        }
        if visited.last().is_some_and(|mx| **mx != perm.len() - 1) {
            return Err(Error::InvalidPermutation(format!(
                "{perm:?} does not address every internal axis"
            )));
        }
        Ok(Self(perm.to_smallvec()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Internal index of the given external axis.
    pub fn internal(&self, external: usize) -> Option<usize> {
        self.0.get(external).copied()
    }

    /// The permutation from internal to external numbering.
    pub fn inverse(&self) -> Self {
        let mut inv: ShortVec<usize> = smallvec::smallvec![0; self.0.len()];
        for (external, internal) in self.0.iter().enumerate() {
            inv[*internal] = external;
        }
        Self(inv)
    }

    /// Reorder the external axes so that new axis `i` is the current axis `order[i]`,
    /// accumulating onto this permutation.
    pub fn permuted(&self, order: &AxisPermutation) -> Result<Self> {
        if order.len() != self.len() {
            return Err(Error::InvalidPermutation(format!(
                "cannot reorder {} axes with a permutation of {}",
                self.len(),
                order.len()
            )));
        }
        Ok(Self(order.0.iter().map(|o| self.0[*o]).collect()))
    }

    /// Scatter externally-ordered values into internal order.
    pub fn to_internal<T: Copy>(&self, external: &[T], internal: &mut [T]) {
        for (value, idx) in external.iter().zip(self.0.iter()) {
            internal[*idx] = *value;
        }
    }

    /// Gather internally-ordered values into external order.
    pub fn to_external<T: Copy>(&self, internal: &[T], external: &mut [T]) {
        for (out, idx) in external.iter_mut().zip(self.0.iter()) {
            *out = internal[*idx];
        }
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(a, b)| a == *b)
    }
}

#[cfg(test)]
mod tests {
    use super::AxisPermutation;
    use crate::Error;

    #[test]
    fn test_rejects_non_bijection() {
        assert!(matches!(
            AxisPermutation::try_new(&[0, 0, 1]),
            Err(Error::InvalidPermutation(_))
        ));
        assert!(matches!(
            AxisPermutation::try_new(&[0, 3, 1]),
            Err(Error::InvalidPermutation(_))
        ));
        assert!(AxisPermutation::try_new(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_inverse() {
        let p = AxisPermutation::try_new(&[2, 0, 3, 1]).unwrap();
        let inv = p.inverse();
        assert_eq!(inv.as_slice(), &[1, 3, 0, 2]);
        assert!(p.permuted(&inv).unwrap().is_identity());
        assert!(inv.permuted(&p).unwrap().is_identity());
    }

    #[test]
    fn test_permuted_is_cumulative() {
        let p = AxisPermutation::try_new(&[1, 2, 0]).unwrap();
        let order = AxisPermutation::try_new(&[2, 0, 1]).unwrap();
        let q = p.permuted(&order).unwrap();
        assert_eq!(q.as_slice(), &[0, 1, 2]);

        let order2 = AxisPermutation::try_new(&[1, 0, 2]).unwrap();
        assert_eq!(q.permuted(&order2).unwrap().as_slice(), &[1, 0, 2]);
        assert!(p.permuted(&AxisPermutation::identity(2)).is_err());
    }

    #[test]
    fn test_scatter_gather() {
        let p = AxisPermutation::try_new(&[2, 0, 1]).unwrap();
        let mut internal = [0.0; 3];
        p.to_internal(&[10.0, 20.0, 30.0], &mut internal);
        assert_eq!(internal, [20.0, 30.0, 10.0]);

        let mut external = [0.0; 3];
        p.to_external(&internal, &mut external);
        assert_eq!(external, [10.0, 20.0, 30.0]);
    }
}
