use crate::{AxisPermutation, ShortVec};

/// Which component of a compound frame an axis belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    First,
    Second,
}

/// Decide which component frame each selected axis of a compound frame is drawn from.
///
/// `select` holds external axis indices into the compound;
/// `None` or out-of-range entries are "extra" axes, not tied to any existing axis.
/// Extra axes go with the nearest preceding real axis
/// (or the nearest following one, if `following` is set);
/// extra axes with no such neighbour go with the first real axis met from that end.
/// If there are no real axes at all, everything goes to the first component
/// (the second, if `following`).
pub fn partition_selection(
    select: &[Option<usize>],
    perm: &AxisPermutation,
    naxes1: usize,
    following: bool,
) -> ShortVec<Component> {
    let tag = |sel: &Option<usize>| {
        sel.and_then(|axis| perm.internal(axis)).map(|internal| {
            if internal < naxes1 {
                Component::First
            } else {
                Component::Second
            }
        })
    };
    let tags: ShortVec<Option<Component>> = select.iter().map(tag).collect();

    let order: ShortVec<usize> = if following {
        (0..tags.len()).rev().collect()
    } else {
        (0..tags.len()).collect()
    };

    let mut current = order
        .iter()
        .find_map(|idx| tags[*idx])
        .unwrap_or(if following {
            Component::Second
        } else {
            Component::First
        });

    let mut out: ShortVec<Component> = smallvec::smallvec![current; tags.len()];
    for idx in order {
        match tags[idx] {
            Some(c) => {
                current = c;
                out[idx] = c;
            }
            None => out[idx] = current,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Component, partition_selection};
    use crate::AxisPermutation;

    use Component::{First, Second};

    #[test]
    fn test_direct() {
        // external axes 0, 1, 2 live internally at 2, 0, 1; first component has 1 axis
        let perm = AxisPermutation::try_new(&[2, 0, 1]).unwrap();
        let got = partition_selection(&[Some(0), Some(1), Some(2)], &perm, 1, false);
        assert_eq!(got.as_slice(), &[Second, First, Second]);
    }

    #[test]
    fn test_extra_preceding() {
        let perm = AxisPermutation::identity(4);
        let got = partition_selection(&[None, Some(3), None, Some(0), None], &perm, 2, false);
        assert_eq!(got.as_slice(), &[Second, Second, Second, First, First]);
    }

    #[test]
    fn test_extra_following() {
        let perm = AxisPermutation::identity(4);
        let got = partition_selection(&[None, Some(3), None, Some(0), None], &perm, 2, true);
        assert_eq!(got.as_slice(), &[Second, Second, First, First, First]);
    }

    #[test]
    fn test_out_of_range_is_extra() {
        let perm = AxisPermutation::identity(2);
        let got = partition_selection(&[Some(1), Some(7)], &perm, 1, false);
        assert_eq!(got.as_slice(), &[Second, Second]);
    }

    #[test]
    fn test_no_real_axes() {
        let perm = AxisPermutation::identity(2);
        assert_eq!(
            partition_selection(&[None, None], &perm, 1, false).as_slice(),
            &[First, First]
        );
        assert_eq!(
            partition_selection(&[None, None], &perm, 1, true).as_slice(),
            &[Second, Second]
        );
        assert!(partition_selection(&[], &perm, 1, true).is_empty());
    }
}
