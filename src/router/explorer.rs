//! Runs the two candidate branches of a diagonal placement side by side and
//! keeps the better route.

use std::{cmp::Ordering, thread};

use crate::{canvas::AccessObstacles, stepper::Step};

use super::{BranchContext, BranchStepper, RouteOutcome, RouterError};

/// Finishes both branches on their own threads. Each branch owns its route;
/// they share only the read-only context.
///
/// A branch that panics fails the whole exploration with
/// [`RouterError::BranchInterrupted`].
pub fn explore<O: AccessObstacles>(
    context: &BranchContext<'_, O>,
    horizontal: BranchStepper,
    vertical: BranchStepper,
) -> Result<RouteOutcome, RouterError> {
    let (horizontal, vertical) = thread::scope(|scope| {
        let horizontal = scope.spawn(move || {
            let mut branch = horizontal;
            branch.finish(context)
        });
        let vertical = scope.spawn(move || {
            let mut branch = vertical;
            branch.finish(context)
        });

        (horizontal.join(), vertical.join())
    });

    let horizontal = horizontal.map_err(|_| RouterError::BranchInterrupted)??;
    let vertical = vertical.map_err(|_| RouterError::BranchInterrupted)??;

    log::debug!(
        "horizontal branch: {} points, length {}; vertical branch: {} points, length {}",
        horizontal.points().len(),
        horizontal.length(),
        vertical.points().len(),
        vertical.length()
    );

    Ok(match compare_branches(&horizontal, &vertical) {
        Ordering::Greater => vertical,
        _ => horizontal,
    })
}

/// Orders two outcomes, better first: complete before partial, axis-aligned
/// before broken, then shorter, then fewer bends.
pub fn compare_branches(a: &RouteOutcome, b: &RouteOutcome) -> Ordering {
    let key = |outcome: &RouteOutcome| {
        (
            !outcome.is_complete(),
            !outcome.is_axis_aligned(),
            outcome.length(),
            outcome.points().len(),
        )
    };

    key(a).cmp(&key(b))
}
