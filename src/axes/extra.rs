use std::ops::Range;

use crate::ShortVec;

fn first_defined<'a>(mut it: impl Iterator<Item = &'a Option<usize>>) -> Option<usize> {
    it.find_map(|a| *a)
}

/// Give every missing (`None`) axis index within `range` a concrete value,
/// placing it relative to its defined neighbours.
///
/// Each new index is numbered consecutively after the defined index which precedes it,
/// or, if `following` is set, consecutively before the one which follows it.
/// Where there is no such neighbour, the other direction is used;
/// an array with no defined indices at all starts from zero.
/// Runs of missing indices are numbered in order of occurrence.
///
/// Defined indices anywhere in `axes` which would collide with a new one are incremented,
/// so values stay distinct and keep their relative order,
/// but some integers may end up unused.
pub fn add_extra_axes(axes: &mut [Option<usize>], range: Range<usize>, following: bool) {
    if range.is_empty() {
        return;
    }

    // Look past the ends of the range so that it is numbered consistently with
    // any neighbouring range which has already been processed.
    let before = |axes: &[Option<usize>]| first_defined(axes[..range.end].iter().rev()).map(|v| v + 1);
    let after = |axes: &[Option<usize>]| first_defined(axes[range.start..].iter());
    let mut extra = if following {
        before(&*axes).or_else(|| after(&*axes))
    } else {
        after(&*axes).or_else(|| before(&*axes))
    }
    .unwrap_or(0);

    let order: ShortVec<usize> = if following {
        range.rev().collect()
    } else {
        range.collect()
    };

    for idx in order {
        match axes[idx] {
            None => {
                for v in axes.iter_mut().flatten() {
                    if *v >= extra {
                        *v += 1;
                    }
                }
                axes[idx] = Some(extra);
                if !following {
                    extra += 1;
                }
            }
            Some(v) => extra = if following { v } else { v + 1 },
        }
    }
}

/// Replace each index by its rank among all the indices,
/// compressing them to `0..axes.len()` without changing their relative order.
pub fn renumber_axes(axes: &mut [usize]) {
    let mut work: ShortVec<usize> = (0..axes.len()).collect();
    work.sort_by_key(|idx| axes[*idx]);
    for (rank, idx) in work.into_iter().enumerate() {
        axes[idx] = rank;
    }
}
