use std::sync::Arc;

use smallvec::ToSmallVec;

use crate::{Error, Result, ShortVec, Transformation, is_null_permutation};

/// Reorder, drop, duplicate or default the axes of the input point.
///
/// For an input point `p`, output index `j` is `p[out_map[j]]`,
/// or NaN where `out_map[j]` is `None`.
/// The inverse direction uses `in_map` in the same way:
/// input index `i` is recovered from output index `in_map[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    in_map: ShortVec<Option<usize>>,
    out_map: ShortVec<Option<usize>>,
}

impl Permutation {
    /// `in_map` has one entry per input axis, giving the output axis it is recovered from;
    /// `out_map` has one entry per output axis, giving the input axis it is taken from.
    pub fn try_new(in_map: &[Option<usize>], out_map: &[Option<usize>]) -> Result<Self> {
        let nin = in_map.len();
        let nout = out_map.len();
        if let Some(axis) = in_map.iter().flatten().find(|o| **o >= nout) {
            return Err(Error::AxisOutOfRange {
                axis: *axis,
                naxes: nout,
            });
        }
        if let Some(axis) = out_map.iter().flatten().find(|i| **i >= nin) {
            return Err(Error::AxisOutOfRange {
                axis: *axis,
                naxes: nin,
            });
        }
        Ok(Self {
            in_map: in_map.to_smallvec(),
            out_map: out_map.to_smallvec(),
        })
    }

    /// Derive the inverse-direction map from the forward one:
    /// each input axis is recovered from the first output axis which takes it.
    pub fn from_out_map(nin: usize, out_map: &[Option<usize>]) -> Result<Self> {
        let mut in_map: ShortVec<Option<usize>> = smallvec::smallvec![None; nin];
        for (out_idx, in_idx) in out_map.iter().enumerate() {
            let Some(in_idx) = in_idx else {
                continue;
            };
            match in_map.get_mut(*in_idx) {
                Some(slot) => {
                    slot.get_or_insert(out_idx);
                }
                None => {
                    return Err(Error::AxisOutOfRange {
                        axis: *in_idx,
                        naxes: nin,
                    });
                }
            }
        }
        Self::try_new(&in_map, out_map)
    }
}

impl Transformation for Permutation {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        for (o, m) in buf.iter_mut().zip(self.out_map.iter()) {
            *o = m.map_or(f64::NAN, |i| pt[i]);
        }
    }

    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        for (m, buf_col) in self.out_map.iter().zip(bufs.iter_mut()) {
            match m {
                Some(i) => buf_col.copy_from_slice(columns[*i]),
                None => buf_col.fill(f64::NAN),
            }
        }
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        Some(Arc::new(Self {
            in_map: self.out_map.clone(),
            out_map: self.in_map.clone(),
        }))
    }

    fn is_identity(&self) -> bool {
        is_null_permutation(&self.in_map, &self.out_map)
    }

    fn input_ndim(&self) -> usize {
        self.in_map.len()
    }

    fn output_ndim(&self) -> usize {
        self.out_map.len()
    }
}
