use std::sync::Arc;

use crate::{Error, Result, Transformation};

/// Multiply every coordinate by the same factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    ndim: usize,
    factor: f64,
}

impl Zoom {
    pub fn try_new(ndim: usize, factor: f64) -> Result<Self> {
        if !factor.is_normal() {
            return Err(Error::InvalidTransform(format!(
                "Zoom factor must be finite and non-zero, got {factor}"
            )));
        }
        Ok(Self { ndim, factor })
    }
}

impl Transformation for Zoom {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        for (o, p) in buf.iter_mut().zip(pt.iter()) {
            *o = p * self.factor;
        }
    }

    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        for (col_in, buf_in) in columns.iter().zip(bufs.iter_mut()) {
            for (c, b) in col_in.iter().zip(buf_in.iter_mut()) {
                *b = c * self.factor;
            }
        }
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        Some(Arc::new(Self {
            ndim: self.ndim,
            factor: self.factor.recip(),
        }))
    }

    fn is_identity(&self) -> bool {
        self.factor == 1.0
    }

    fn input_ndim(&self) -> usize {
        self.ndim
    }

    fn output_ndim(&self) -> usize {
        self.ndim
    }
}

#[cfg(test)]
mod tests {
    use super::Zoom;
    use crate::tests::{
        check_inverse_transform_bulk, check_inverse_transform_col, check_inverse_transform_coord,
        check_transform_bulk, check_transform_col,
    };

    fn make_transform() -> Zoom {
        Zoom::try_new(3, 0.25).unwrap()
    }

    #[test]
    fn test_rejects_degenerate() {
        assert!(Zoom::try_new(2, 0.0).is_err());
        assert!(Zoom::try_new(2, f64::NAN).is_err());
        assert!(Zoom::try_new(2, f64::INFINITY).is_err());
        assert!(Zoom::try_new(2, -3.0).is_ok());
    }

    #[test]
    fn test_bulk() {
        check_transform_bulk(make_transform());
    }

    #[test]
    fn test_columns() {
        check_transform_col(make_transform());
    }

    #[test]
    fn test_inverse() {
        check_inverse_transform_coord(make_transform());
    }

    #[test]
    fn test_inverse_bulk() {
        check_inverse_transform_bulk(make_transform());
    }

    #[test]
    fn test_inverse_columns() {
        check_inverse_transform_col(make_transform());
    }
}
