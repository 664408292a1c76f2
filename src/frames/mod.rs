//! Frame implementations and the top-level matching and selection entry points.
mod axis;
pub use axis::Axis;
mod basic;
pub use basic::BasicFrame;
mod compound;
pub use compound::CompoundFrame;
mod controls;
pub use controls::MatchControls;
mod matching;
mod selecting;

use crate::{Error, Frame, FrameMatch, Result, SubFrame};

/// Match `template` against `target` using the template's own match controls.
///
/// Returns `Ok(None)` if there is no way of matching the frames.
pub fn find_match(template: &dyn Frame, target: &dyn Frame) -> Result<Option<FrameMatch>> {
    template.match_with(target, &template.controls())
}

/// Select `result_naxes` axes from `target`, optionally overlaying the attributes of `template`.
///
/// Entries of `target_axes` which are `None` (or out of range) produce default axes.
/// `template_axes`, if given, names the template axis overlaid on each selected axis.
pub fn select_axes(
    target: &dyn Frame,
    template: Option<&dyn Frame>,
    result_naxes: usize,
    target_axes: &[Option<usize>],
    template_axes: Option<&[Option<usize>]>,
) -> Result<Option<SubFrame>> {
    if target_axes.len() != result_naxes {
        return Err(Error::SelectionLength {
            expected: result_naxes,
            found: target_axes.len(),
        });
    }
    if let Some(t) = template_axes {
        if t.len() != result_naxes {
            return Err(Error::SelectionLength {
                expected: result_naxes,
                found: t.len(),
            });
        }
    }
    target.sub_frame(template, target_axes, template_axes)
}

/// Select axes from `frame` without any overlay.
pub fn pick_axes(frame: &dyn Frame, axes: &[Option<usize>]) -> Result<Option<SubFrame>> {
    frame.sub_frame(None, axes, None)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Axis, BasicFrame, CompoundFrame, find_match, select_axes};
    use crate::tests::{init_logger, transform};
    use crate::Error;

    #[test]
    fn test_select_length_checked() {
        let f = BasicFrame::new(3);
        assert!(matches!(
            select_axes(&f, None, 2, &[Some(0)], None),
            Err(Error::SelectionLength {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            select_axes(&f, Some(&f), 1, &[Some(0)], Some(&[])),
            Err(Error::SelectionLength {
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn test_select_overlay() {
        init_logger();
        let target =
            CompoundFrame::new(Arc::new(BasicFrame::new(1)), Arc::new(BasicFrame::new(2)));
        let template = BasicFrame::new(2)
            .with_axes(vec![
                Axis::default().with_unit("m"),
                Axis::default().with_unit("s"),
            ])
            .unwrap();
        let sub = select_axes(
            &target,
            Some(&template),
            2,
            &[Some(2), Some(0)],
            Some(&[Some(1), Some(0)]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(sub.frame.axis(0).unwrap().unit.as_deref(), Some("s"));
        assert_eq!(sub.frame.axis(1).unwrap().unit.as_deref(), Some("m"));
        assert_eq!(transform(sub.mapping.as_ref(), &[1.0, 2.0, 3.0]), vec![3.0, 1.0]);
    }

    #[test]
    fn test_basic_template_on_compound_target() {
        init_logger();
        let target = CompoundFrame::new(
            Arc::new(BasicFrame::new(1).with_domain("A")),
            Arc::new(BasicFrame::new(1).with_domain("B")),
        );
        let template = BasicFrame::new(2);
        let found = find_match(&template, &target).unwrap().unwrap();
        assert_eq!(found.result.naxes(), 2);
        assert_eq!(found.target_axes, vec![Some(0), Some(1)]);
    }
}
