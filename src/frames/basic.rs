use std::sync::Arc;

use log::debug;

use crate::frames::{Axis, MatchControls};
use crate::{
    Error, Frame, FrameMatch, Identity, Permutation, Result, SubFrame, Transformation, reserved,
    scratch,
};

const DEFAULT_DIGITS: usize = 7;

/// A simple Cartesian coordinate system with a fixed number of described axes.
#[derive(Debug, Clone)]
pub struct BasicFrame {
    axes: Vec<Axis>,
    domain: Option<String>,
    min_axes: Option<usize>,
    max_axes: Option<usize>,
    controls: MatchControls,
    digits: usize,
}

impl BasicFrame {
    pub fn new(naxes: usize) -> Self {
        Self {
            axes: vec![Axis::default(); naxes],
            domain: None,
            min_axes: None,
            max_axes: None,
            controls: MatchControls::default(),
            digits: DEFAULT_DIGITS,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the range of target axis counts this frame can match.
    /// A maximum below the minimum is raised to it.
    pub fn with_axis_range(mut self, min_axes: usize, max_axes: usize) -> Self {
        self.min_axes = Some(min_axes);
        self.max_axes = Some(max_axes.max(min_axes));
        self
    }

    pub fn with_controls(mut self, controls: MatchControls) -> Self {
        self.controls = controls;
        self
    }

    /// Number of decimal places used when formatting values.
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Replace the axis descriptions; there must be one per axis.
    pub fn with_axes(mut self, axes: Vec<Axis>) -> Result<Self> {
        if axes.len() != self.axes.len() {
            return Err(Error::DimensionMismatch {
                expected: self.axes.len(),
                found: axes.len(),
            });
        }
        self.axes = axes;
        Ok(self)
    }
}

/// A permutation mapping, or the identity if it would not move anything.
fn selection_mapping(
    nin: usize,
    out_map: &[Option<usize>],
) -> Result<Arc<dyn Transformation>> {
    let perm = Permutation::from_out_map(nin, out_map)?;
    if perm.is_identity() {
        Ok(Arc::new(Identity::new(nin)))
    } else {
        Ok(Arc::new(perm))
    }
}

impl Frame for BasicFrame {
    fn naxes(&self) -> usize {
        self.axes.len()
    }

    fn min_axes(&self) -> usize {
        self.min_axes.unwrap_or(self.axes.len())
    }

    fn max_axes(&self) -> usize {
        self.max_axes.unwrap_or(self.axes.len())
    }

    fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    fn controls(&self) -> MatchControls {
        self.controls
    }

    fn axis(&self, axis: usize) -> Option<&Axis> {
        self.axes.get(axis)
    }

    fn primary_frame(&self, axis: usize) -> Option<(&dyn Frame, usize)> {
        (axis < self.axes.len()).then_some((self as &dyn Frame, axis))
    }

    fn format(&self, axis: usize, value: f64) -> Option<String> {
        self.axes.get(axis)?;
        if value.is_nan() {
            return Some("<bad>".to_string());
        }
        Some(format!("{:.*}", self.digits, value))
    }

    fn distance(&self, point1: &[f64], point2: &[f64]) -> f64 {
        point1
            .iter()
            .zip(point2.iter())
            .map(|(a, b)| (b - a) * (b - a))
            .sum::<f64>()
            .sqrt()
    }

    fn offset(&self, point1: &[f64], point2: &[f64], offset: f64, buf: &mut [f64]) {
        let dist = self.distance(point1, point2);
        if dist.is_nan() || (dist == 0.0 && offset != 0.0) {
            buf.fill(f64::NAN);
            return;
        }
        let frac = if dist == 0.0 { 0.0 } else { offset / dist };
        for ((b, p1), p2) in buf.iter_mut().zip(point1.iter()).zip(point2.iter()) {
            *b = p1 + (p2 - p1) * frac;
        }
    }

    fn norm(&self, _value: &mut [f64]) {}

    fn match_with(
        &self,
        target: &dyn Frame,
        controls: &MatchControls,
    ) -> Result<Option<FrameMatch>> {
        let naxes = target.naxes();
        if naxes < self.min_axes() || naxes > self.max_axes() {
            debug!(
                "{naxes}-axis target outside range {}..={}",
                self.min_axes(),
                self.max_axes()
            );
            return Ok(None);
        }
        if let Some(domain) = self.domain() {
            if target.domain().is_some_and(|d| d != domain) {
                debug!("domain {domain:?} cannot match {:?}", target.domain());
                return Ok(None);
            }
        }

        let preserve = controls.preserves_axes();
        let result_naxes = if preserve { naxes } else { self.naxes() };
        let npair = naxes.min(self.naxes());
        let (template_start, target_start) = if controls.matches_end() {
            (self.naxes() - npair, naxes - npair)
        } else {
            (0, 0)
        };

        let mut template_axes = scratch(result_naxes, None)?;
        let mut target_axes = scratch(result_naxes, None)?;
        for k in 0..npair {
            let (tmpl, tgt) = (template_start + k, target_start + k);
            let r = if preserve { tgt } else { tmpl };
            template_axes[r] = Some(tmpl);
            target_axes[r] = Some(tgt);
        }
        if preserve {
            for (r, t) in target_axes.iter_mut().enumerate() {
                t.get_or_insert(r);
            }
        } else {
            for (r, t) in template_axes.iter_mut().enumerate() {
                t.get_or_insert(r);
            }
        }

        let mut axes = reserved(result_naxes)?;
        for (tmpl, tgt) in template_axes.iter().zip(target_axes.iter()) {
            let base = tgt
                .and_then(|a| target.axis(a))
                .cloned()
                .unwrap_or_default();
            axes.push(match tmpl.and_then(|a| self.axes.get(a)) {
                Some(over) => base.overlaid(over),
                None => base,
            });
        }

        let result = Self {
            axes,
            domain: self
                .domain
                .clone()
                .or_else(|| target.domain().map(String::from)),
            min_axes: None,
            max_axes: None,
            controls: self.controls,
            digits: self.digits,
        };
        let mapping = selection_mapping(naxes, &target_axes)?;
        Ok(Some(FrameMatch {
            result: Arc::new(result),
            mapping,
            template_axes,
            target_axes,
        }))
    }

    fn sub_frame(
        &self,
        template: Option<&dyn Frame>,
        target_axes: &[Option<usize>],
        template_axes: Option<&[Option<usize>]>,
    ) -> Result<Option<SubFrame>> {
        let naxes = self.naxes();
        let mut out_map = scratch(target_axes.len(), None)?;
        let mut axes = reserved(target_axes.len())?;

        for (r, sel) in target_axes.iter().enumerate() {
            let sel = sel.filter(|a| *a < naxes);
            out_map[r] = sel;
            let base = sel.map(|a| self.axes[a].clone()).unwrap_or_default();
            let over = template.and_then(|t| {
                let idx = template_axes.and_then(|ta| ta.get(r).copied().flatten())?;
                t.axis(idx)
            });
            axes.push(match over {
                Some(over) => base.overlaid(over),
                None => base,
            });
        }

        let domain = template
            .and_then(|t| t.domain())
            .map(String::from)
            .or_else(|| self.domain.clone());
        let frame = Self {
            axes,
            domain,
            min_axes: None,
            max_axes: None,
            controls: self.controls,
            digits: self.digits,
        };
        let mapping = selection_mapping(naxes, &out_map)?;
        Ok(Some(SubFrame {
            frame: Arc::new(frame),
            mapping,
        }))
    }
}
