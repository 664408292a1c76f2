//! Selecting axes from a compound frame by delegating to its components.
use std::sync::Arc;

use log::debug;

use crate::axes::{Component, partition_selection};
use crate::compose::wrap;
use crate::frames::CompoundFrame;
use crate::{
    AxisPermutation, Frame, Result, ShortVec, SubFrame, compose_parallel,
    permutation_or_identity, scratch,
};

/// Permutation from the compound's external axes to those of one component,
/// which holds internal axes `start..start + len`.
fn component_prefix(
    perm: &AxisPermutation,
    start: usize,
    len: usize,
) -> Result<(Vec<Option<usize>>, Vec<Option<usize>>)> {
    let mut in_map = scratch(perm.len(), None)?;
    let mut out_map = scratch(len, None)?;
    for (external, internal) in perm.as_slice().iter().enumerate() {
        let Some(local) = internal.checked_sub(start).filter(|l| *l < len) else {
            continue;
        };
        in_map[external] = Some(local);
        out_map[local] = Some(external);
    }
    Ok((in_map, out_map))
}

pub(crate) fn select_from_compound(
    compound: &CompoundFrame,
    template: Option<&dyn Frame>,
    target_axes: &[Option<usize>],
    template_axes: Option<&[Option<usize>]>,
) -> Result<Option<SubFrame>> {
    let perm = compound.perm();
    let naxes1 = compound.frame1().naxes();
    let naxes2 = compound.frame2().naxes();
    let following = compound.controls().matches_end();
    let parts = partition_selection(target_axes, perm, naxes1, following);

    let mut target1: ShortVec<Option<usize>> = ShortVec::new();
    let mut target2: ShortVec<Option<usize>> = ShortVec::new();
    let mut template1: ShortVec<Option<usize>> = ShortVec::new();
    let mut template2: ShortVec<Option<usize>> = ShortVec::new();
    // position of each selected axis in the concatenated component selections
    let mut positions: ShortVec<(Component, usize)> = ShortVec::new();
    for (r, (sel, part)) in target_axes.iter().zip(parts.iter()).enumerate() {
        let internal = sel.and_then(|a| perm.internal(a));
        let tmpl = template_axes.and_then(|t| t.get(r).copied().flatten());
        match part {
            Component::First => {
                positions.push((*part, target1.len()));
                target1.push(internal.filter(|i| *i < naxes1));
                template1.push(tmpl);
            }
            Component::Second => {
                positions.push((*part, target2.len()));
                target2.push(internal.and_then(|i| i.checked_sub(naxes1)));
                template2.push(tmpl);
            }
        }
    }
    let template_axes1 = template_axes.map(|_| template1.as_slice());
    let template_axes2 = template_axes.map(|_| template2.as_slice());

    if target2.is_empty() {
        debug!("selecting {target_axes:?} from first component only");
        let Some(sub) = compound.frame1().sub_frame(template, &target1, template_axes1)? else {
            return Ok(None);
        };
        let (in_map, out_map) = component_prefix(perm, 0, naxes1)?;
        let mapping = wrap(permutation_or_identity(&in_map, &out_map)?, sub.mapping, None)?;
        return Ok(Some(SubFrame {
            frame: sub.frame,
            mapping,
        }));
    }
    if target1.is_empty() {
        debug!("selecting {target_axes:?} from second component only");
        let Some(sub) = compound.frame2().sub_frame(template, &target2, template_axes2)? else {
            return Ok(None);
        };
        let (in_map, out_map) = component_prefix(perm, naxes1, naxes2)?;
        let mapping = wrap(permutation_or_identity(&in_map, &out_map)?, sub.mapping, None)?;
        return Ok(Some(SubFrame {
            frame: sub.frame,
            mapping,
        }));
    }

    debug!("selecting {target_axes:?} from both components");
    let Some(sub1) = compound.frame1().sub_frame(template, &target1, template_axes1)? else {
        return Ok(None);
    };
    let Some(sub2) = compound.frame2().sub_frame(template, &target2, template_axes2)? else {
        return Ok(None);
    };

    // compound order to component order
    let (prefix_in, prefix_out) = component_prefix(perm, 0, perm.len())?;

    // concatenated component selections back to the requested order
    let nselect = target_axes.len();
    let mut suffix_in = scratch(nselect, None)?;
    let mut suffix_out = scratch(nselect, 0)?;
    for (r, (part, idx)) in positions.iter().enumerate() {
        let pos = match part {
            Component::First => *idx,
            Component::Second => target1.len() + idx,
        };
        suffix_in[pos] = Some(r);
        suffix_out[r] = pos;
    }
    let suffix_out_map: ShortVec<Option<usize>> = suffix_out.iter().map(|p| Some(*p)).collect();

    let mapping = wrap(
        permutation_or_identity(&prefix_in, &prefix_out)?,
        compose_parallel(sub1.mapping, sub2.mapping),
        permutation_or_identity(&suffix_in, &suffix_out_map)?,
    )?;

    let order = AxisPermutation::try_new(&suffix_out)?;
    let mut frame = CompoundFrame::new(sub1.frame, sub2.frame).permuted(&order)?;
    if let Some(domain) = template.and_then(|t| t.domain()) {
        frame = frame.with_domain(domain);
    }
    Ok(Some(SubFrame {
        frame: Arc::new(frame),
        mapping,
    }))
}
