use std::sync::Arc;

use crate::Transformation;

/// Returns the input point unchanged.
///
/// Defined for one dimensionality; used where a component match needs no conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Identity(usize);

impl Identity {
    pub fn new(ndim: usize) -> Self {
        Self(ndim)
    }
}

impl Transformation for Identity {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        buf.copy_from_slice(pt);
    }

    fn bulk_transform_into(&self, pts: &[&[f64]], bufs: &mut [&mut [f64]]) {
        for (pt, buf) in pts.iter().zip(bufs.iter_mut()) {
            buf.copy_from_slice(pt);
        }
    }

    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        for (c, b) in columns.iter().zip(bufs.iter_mut()) {
            b.copy_from_slice(c);
        }
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        Some(Arc::new(*self))
    }

    fn is_identity(&self) -> bool {
        true
    }

    fn input_ndim(&self) -> usize {
        self.0
    }

    fn output_ndim(&self) -> usize {
        self.0
    }
}
