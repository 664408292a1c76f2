use std::sync::Arc;

use crate::Transformation;

/// Apply two transformations side by side to disjoint groups of axes.
///
/// The first `first.input_ndim()` input coordinates go to `first`, the rest to `second`;
/// the outputs are concatenated in the same order.
#[derive(Debug, Clone)]
pub struct Parallel {
    first: Arc<dyn Transformation>,
    second: Arc<dyn Transformation>,
}

impl Parallel {
    pub fn new(first: Arc<dyn Transformation>, second: Arc<dyn Transformation>) -> Self {
        Self { first, second }
    }

    fn split_in(&self) -> usize {
        self.first.input_ndim()
    }

    fn split_out(&self) -> usize {
        self.first.output_ndim()
    }
}

impl Transformation for Parallel {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        let (pt1, pt2) = pt.split_at(self.split_in());
        let (buf1, buf2) = buf.split_at_mut(self.split_out());
        self.first.transform_into(pt1, buf1);
        self.second.transform_into(pt2, buf2);
    }

    fn bulk_transform_into(&self, pts: &[&[f64]], bufs: &mut [&mut [f64]]) {
        let split_in = self.split_in();
        let split_out = self.split_out();

        let mut pts1 = Vec::with_capacity(pts.len());
        let mut pts2 = Vec::with_capacity(pts.len());
        for pt in pts.iter() {
            let (a, b) = pt.split_at(split_in);
            pts1.push(a);
            pts2.push(b);
        }

        let mut bufs1 = Vec::with_capacity(bufs.len());
        let mut bufs2 = Vec::with_capacity(bufs.len());
        for buf in bufs.iter_mut() {
            let (a, b) = buf.split_at_mut(split_out);
            bufs1.push(a);
            bufs2.push(b);
        }

        self.first.bulk_transform_into(&pts1, &mut bufs1);
        self.second.bulk_transform_into(&pts2, &mut bufs2);
    }

    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        let (cols1, cols2) = columns.split_at(self.split_in());
        let (bufs1, bufs2) = bufs.split_at_mut(self.split_out());
        self.first.column_transform_into(cols1, bufs1);
        self.second.column_transform_into(cols2, bufs2);
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        Some(Arc::new(Self {
            first: self.first.invert()?,
            second: self.second.invert()?,
        }))
    }

    fn is_identity(&self) -> bool {
        self.first.is_identity() && self.second.is_identity()
    }

    fn input_ndim(&self) -> usize {
        self.first.input_ndim() + self.second.input_ndim()
    }

    fn output_ndim(&self) -> usize {
        self.first.output_ndim() + self.second.output_ndim()
    }
}
