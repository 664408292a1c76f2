//! Matching a compound template against an arbitrary target,
//! by trying every admissible way of dividing the target's axes between
//! the template's two components.
use std::sync::Arc;

use log::{debug, trace};

use crate::axes::{AxisSelections, add_extra_axes, renumber_axes};
use crate::compose::wrap;
use crate::frames::{CompoundFrame, MatchControls};
use crate::{
    AxisPermutation, Frame, FrameMatch, Result, ShortVec, compose_parallel,
    permutation_or_identity, scratch,
};

/// Whether the defined entries are strictly increasing.
fn is_ascending(axes: &[Option<usize>]) -> bool {
    let mut last: Option<usize> = None;
    for a in axes.iter().flatten() {
        if last.is_some_and(|l| l >= *a) {
            return false;
        }
        last = Some(*a);
    }
    true
}

/// Controls for matching one component of a compound template:
/// its own, falling back to those in effect for the whole template,
/// with permutation always allowed (the compound checks it afterwards).
fn component_controls(component: &dyn Frame, whole: &MatchControls) -> MatchControls {
    MatchControls {
        permute: Some(true),
        ..component.controls().or(*whole)
    }
}

pub(crate) fn match_compound(
    template: &CompoundFrame,
    target: &dyn Frame,
    controls: &MatchControls,
) -> Result<Option<FrameMatch>> {
    let naxes = target.naxes();
    let (frame1, frame2) = (template.frame1(), template.frame2());
    let (min1, max1) = (frame1.min_axes(), frame1.max_axes());
    let (min2, max2) = (frame2.min_axes(), frame2.max_axes());

    if naxes < min1 + min2 || naxes > max1 + max2 {
        debug!(
            "{naxes}-axis target outside compound range {}..={}",
            min1 + min2,
            max1 + max2
        );
        return Ok(None);
    }
    if let Some(domain) = template.domain() {
        if target.domain().is_some_and(|d| d != domain) {
            debug!("domain {domain:?} cannot match {:?}", target.domain());
            return Ok(None);
        }
    }

    // prefer giving as many axes as possible to the first component
    let most = max1.min(naxes - min2);
    let fewest = min1.max(naxes.saturating_sub(max2));
    for naxes1 in (fewest..=most).rev() {
        for axes1 in AxisSelections::new(naxes, naxes1) {
            let axes2: ShortVec<usize> = (0..naxes).filter(|a| !axes1.contains(a)).collect();
            trace!("trying split {axes1:?} / {axes2:?}");

            let Some(found) = part_match(template, target, controls, &axes1, &axes2)? else {
                continue;
            };
            if !controls.allows_permute()
                && !(is_ascending(&found.template_axes) && is_ascending(&found.target_axes))
            {
                debug!(
                    "rejecting split {axes1:?} / {axes2:?}: axes would be reordered ({:?}, {:?})",
                    found.template_axes, found.target_axes
                );
                continue;
            }
            debug!("matched with split {axes1:?} / {axes2:?}");
            return Ok(Some(found));
        }
    }
    debug!("no split of {naxes} target axes matched");
    Ok(None)
}

/// Match both components of `template` against the target axes given by `axes1` and `axes2`,
/// and assemble the combined result.
fn part_match(
    template: &CompoundFrame,
    target: &dyn Frame,
    controls: &MatchControls,
    axes1: &[usize],
    axes2: &[usize],
) -> Result<Option<FrameMatch>> {
    let (frame1, frame2) = (template.frame1(), template.frame2());

    let select1: ShortVec<Option<usize>> = axes1.iter().map(|a| Some(*a)).collect();
    let Some(sub1) = target.sub_frame(None, &select1, None)? else {
        return Ok(None);
    };
    let select2: ShortVec<Option<usize>> = axes2.iter().map(|a| Some(*a)).collect();
    let Some(sub2) = target.sub_frame(None, &select2, None)? else {
        return Ok(None);
    };

    let controls1 = component_controls(frame1.as_ref(), controls);
    let Some(match1) = frame1.match_with(sub1.frame.as_ref(), &controls1)? else {
        trace!("first component rejected {axes1:?}");
        return Ok(None);
    };
    let controls2 = component_controls(frame2.as_ref(), controls);
    let Some(match2) = frame2.match_with(sub2.frame.as_ref(), &controls2)? else {
        trace!("second component rejected {axes2:?}");
        return Ok(None);
    };

    let naxes1 = frame1.naxes();
    let rnaxes1 = match1.result.naxes();
    let rnaxes = rnaxes1 + match2.result.naxes();
    let internal_to_external = template.perm().inverse();
    let to_external = |internal: usize| internal_to_external.as_slice().get(internal).copied();

    // associations for the concatenated component results
    let mut template_assoc = scratch(rnaxes, None)?;
    let mut target_assoc = scratch(rnaxes, None)?;
    let parts = [(&match1, axes1, 0), (&match2, axes2, naxes1)];
    let mut r = 0;
    for (found, axes, offset) in parts {
        for (tmpl, tgt) in found.template_axes.iter().zip(found.target_axes.iter()) {
            template_assoc[r] = tmpl.and_then(|t| to_external(t + offset));
            target_assoc[r] = tgt.and_then(|t| axes.get(t).copied());
            r += 1;
        }
    }

    // order the result axes like those of the frame being preserved
    let preserve = controls.preserves_axes();
    let ref_naxes = if preserve {
        target.naxes()
    } else {
        template.naxes()
    };
    let mut order = scratch(rnaxes, None)?;
    order.copy_from_slice(if preserve {
        &target_assoc
    } else {
        &template_assoc
    });
    // each component's own end preference, ignoring the whole template's
    add_extra_axes(&mut order, 0..rnaxes1, frame1.controls().matches_end());
    add_extra_axes(&mut order, rnaxes1..rnaxes, frame2.controls().matches_end());
    let mut ranks: ShortVec<usize> = order.iter().flatten().copied().collect();
    renumber_axes(&mut ranks);

    let mut result_order = scratch(rnaxes, 0)?;
    for (r, rank) in ranks.iter().enumerate() {
        result_order[*rank] = r;
    }
    let result_order = AxisPermutation::try_new(&result_order)?;
    let combined = CompoundFrame::new(match1.result.clone(), match2.result.clone())
        .permuted(&result_order)?;

    // pick the reference number of axes from one end, if the components disagreed
    let mut picked = scratch(ref_naxes, None)?;
    for (o, p) in picked.iter_mut().enumerate() {
        *p = if controls.matches_end() {
            (o + rnaxes).checked_sub(ref_naxes)
        } else {
            Some(o)
        }
        .filter(|a| *a < rnaxes);
    }
    let result: Arc<dyn Frame> = if ref_naxes == rnaxes {
        Arc::new(combined)
    } else {
        debug!("picking {ref_naxes} of {rnaxes} combined axes: {picked:?}");
        let Some(sub) = combined.sub_frame(None, &picked, None)? else {
            return Ok(None);
        };
        sub.frame
    };

    let mut template_axes = scratch(ref_naxes, None)?;
    let mut target_axes = scratch(ref_naxes, None)?;
    let mut suffix_in = scratch(rnaxes, None)?;
    let mut suffix_out = scratch(ref_naxes, None)?;
    for (o, p) in picked.iter().enumerate() {
        let Some(raw) = p.and_then(|full| result_order.internal(full)) else {
            continue;
        };
        template_axes[o] = template_assoc[raw];
        target_axes[o] = target_assoc[raw];
        suffix_out[o] = Some(raw);
        suffix_in[raw] = Some(o);
    }

    let naxes = target.naxes();
    let mut prefix_in = scratch(naxes, None)?;
    let mut prefix_out = scratch(naxes, None)?;
    for (k, axis) in axes1.iter().chain(axes2.iter()).enumerate() {
        prefix_out[k] = Some(*axis);
        prefix_in[*axis] = Some(k);
    }

    let mapping = wrap(
        permutation_or_identity(&prefix_in, &prefix_out)?,
        compose_parallel(match1.mapping.clone(), match2.mapping.clone()),
        permutation_or_identity(&suffix_in, &suffix_out)?,
    )?;

    Ok(Some(FrameMatch {
        result,
        mapping,
        template_axes,
        target_axes,
    }))
}
