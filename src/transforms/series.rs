use std::sync::Arc;

use smallvec::smallvec;

use crate::{Error, Result, ShortVec, Transformation, as_muts, as_refs, vec_of_vec};

/// Apply transformations one after another.
#[derive(Debug, Clone)]
pub struct Series {
    transforms: Vec<Arc<dyn Transformation>>,
    /// Widest intermediate point between consecutive transforms.
    max_inner_ndim: usize,
}

impl Series {
    fn try_new(transforms: Vec<Arc<dyn Transformation>>) -> Result<Self> {
        if transforms.len() < 2 {
            return Err(Error::InvalidTransform(
                "Series must have >= 2 transformations".into(),
            ));
        }
        let max_inner_ndim = transforms
            .iter()
            .skip(1)
            .map(|t| t.input_ndim())
            .max()
            .unwrap_or(0);
        Ok(Self {
            transforms,
            max_inner_ndim,
        })
    }

    pub fn builder() -> SeriesBuilder {
        SeriesBuilder::default()
    }

    /// Run one point through every step.
    /// `a` and `b` are scratch buffers of at least `max_inner_ndim`;
    /// the intermediate result always ends up in `a`.
    fn transform_with(
        &self,
        pt: &[f64],
        buf: &mut [f64],
        a: &mut ShortVec<f64>,
        b: &mut ShortVec<f64>,
    ) {
        let last = self.transforms.len() - 1;
        for (idx, t) in self.transforms.iter().enumerate() {
            let in_ndim = t.input_ndim();
            let out_ndim = t.output_ndim();
            if idx == 0 {
                t.transform_into(pt, &mut a[..out_ndim]);
            } else if idx == last {
                t.transform_into(&a[..in_ndim], buf);
            } else {
                t.transform_into(&a[..in_ndim], &mut b[..out_ndim]);
                std::mem::swap(a, b);
            }
        }
    }
}

impl Transformation for Series {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        let mut a = smallvec![f64::NAN; self.max_inner_ndim];
        let mut b = smallvec![f64::NAN; self.max_inner_ndim];
        self.transform_with(pt, buf, &mut a, &mut b);
    }

    fn bulk_transform_into(&self, pts: &[&[f64]], bufs: &mut [&mut [f64]]) {
        let mut a = smallvec![f64::NAN; self.max_inner_ndim];
        let mut b = smallvec![f64::NAN; self.max_inner_ndim];
        for (pt, buf) in pts.iter().zip(bufs.iter_mut()) {
            self.transform_with(pt, buf, &mut a, &mut b);
        }
    }

    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        let Some(n_pts) = columns.first().map(|c| c.len()) else {
            return;
        };
        let mut a = vec_of_vec(self.max_inner_ndim, n_pts, f64::NAN);
        let mut b = vec_of_vec(self.max_inner_ndim, n_pts, f64::NAN);

        let last = self.transforms.len() - 1;
        for (idx, t) in self.transforms.iter().enumerate() {
            let in_ndim = t.input_ndim();
            let out_ndim = t.output_ndim();
            if idx == 0 {
                t.column_transform_into(columns, &mut as_muts(&mut a[..out_ndim]));
            } else if idx == last {
                t.column_transform_into(&as_refs(&a[..in_ndim]), bufs);
            } else {
                t.column_transform_into(&as_refs(&a[..in_ndim]), &mut as_muts(&mut b[..out_ndim]));
                std::mem::swap(&mut a, &mut b);
            }
        }
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        let mut inv_transforms = Vec::with_capacity(self.transforms.len());
        for t in self.transforms.iter().rev() {
            inv_transforms.push(t.invert()?);
        }
        Series::try_new(inv_transforms)
            .ok()
            .map(|s| Arc::new(s) as Arc<dyn Transformation>)
    }

    fn is_identity(&self) -> bool {
        self.transforms.iter().all(|t| t.is_identity())
    }

    fn input_ndim(&self) -> usize {
        self.transforms.first().map_or(0, |t| t.input_ndim())
    }

    fn output_ndim(&self) -> usize {
        self.transforms.last().map_or(0, |t| t.output_ndim())
    }
}

/// Accumulates transformations for a [Series], checking that consecutive steps agree
/// on dimensionality.
#[derive(Debug, Default)]
pub struct SeriesBuilder(Vec<Arc<dyn Transformation>>);

impl SeriesBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn add_arced(&mut self, t: Arc<dyn Transformation>) -> Result<&mut Self> {
        if let Some(last_ndim) = self.0.last().map(|prev| prev.output_ndim()) {
            if t.input_ndim() != last_ndim {
                return Err(Error::DimensionMismatch {
                    expected: last_ndim,
                    found: t.input_ndim(),
                });
            }
        }
        self.0.push(t);
        Ok(self)
    }

    pub fn add_transform<T: Transformation + 'static>(&mut self, t: T) -> Result<&mut Self> {
        self.add_arced(Arc::new(t))
    }

    pub fn build(self) -> Result<Series> {
        Series::try_new(self.0)
    }
}
