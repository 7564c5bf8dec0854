//! Parameter sweeps over independent solves.
//!
//! A sweep runs one solve per input value, each from a cold start, and
//! collects the outcomes in input order. A failed point is tagged with its
//! error and the sweep moves on; one bad configuration never spoils the
//! rest. An [`Observer`] sees each point as it lands and may stop the sweep
//! early, e.g. once a target is reached or a caller cancels.

use twine_core::Observer;

/// Instruction an observer can return to end a sweep early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StopEarly,
}

/// How a sweep ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every input value was solved.
    Complete,
    /// The observer stopped the sweep; later values were never attempted.
    StoppedByObserver,
}

/// Emitted to the observer after each point, successful or not.
#[derive(Debug, Clone)]
pub struct Event<V> {
    /// Zero-based position of the point in the sweep.
    pub index: usize,
    /// The swept value at this point.
    pub value: V,
    /// Whether the point solved successfully.
    pub ok: bool,
}

/// One swept point and its outcome.
#[derive(Debug, Clone)]
pub struct SweepPoint<V, T, E> {
    pub value: V,
    pub outcome: Result<T, E>,
}

/// The points of a finished sweep, in input order.
#[derive(Debug, Clone)]
pub struct Sweep<V, T, E> {
    pub status: Status,
    pub points: Vec<SweepPoint<V, T, E>>,
}

impl<V, T, E> Sweep<V, T, E> {
    /// The values and results of the points that solved.
    pub fn successes(&self) -> impl Iterator<Item = (&V, &T)> {
        self.points.iter().filter_map(|point| match &point.outcome {
            Ok(result) => Some((&point.value, result)),
            Err(_) => None,
        })
    }

    /// The values and errors of the points that failed.
    pub fn failures(&self) -> impl Iterator<Item = (&V, &E)> {
        self.points.iter().filter_map(|point| match &point.outcome {
            Ok(_) => None,
            Err(error) => Some((&point.value, error)),
        })
    }
}

/// Runs `solve_point` once per value, observing each point as it lands.
///
/// Points are solved and collected in input order. Errors from individual
/// points are captured in the result; only the observer can end the sweep
/// before the values run out.
pub fn run<V, T, E, F, Obs>(
    values: impl IntoIterator<Item = V>,
    mut solve_point: F,
    mut observer: Obs,
) -> Sweep<V, T, E>
where
    V: Clone,
    F: FnMut(&V) -> Result<T, E>,
    Obs: Observer<Event<V>, Action>,
{
    let mut points = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        let outcome = solve_point(&value);
        let event = Event {
            index,
            value: value.clone(),
            ok: outcome.is_ok(),
        };
        points.push(SweepPoint { value, outcome });

        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Sweep {
                status: Status::StoppedByObserver,
                points,
            };
        }
    }
    Sweep {
        status: Status::Complete,
        points,
    }
}

/// Runs a sweep without observation.
///
/// This is a convenience wrapper around [`run`] that discards events.
pub fn run_unobserved<V, T, E, F>(values: impl IntoIterator<Item = V>, solve_point: F) -> Sweep<V, T, E>
where
    V: Clone,
    F: FnMut(&V) -> Result<T, E>,
{
    run(values, solve_point, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_come_back_in_input_order() {
        let sweep: Sweep<i32, i32, &str> =
            run_unobserved([4, 1, 3], |&value| Ok(value * 2));

        assert_eq!(sweep.status, Status::Complete);
        let values: Vec<i32> = sweep.points.iter().map(|point| point.value).collect();
        assert_eq!(values, vec![4, 1, 3]);
        let doubled: Vec<i32> = sweep
            .successes()
            .map(|(_, &result)| result)
            .collect();
        assert_eq!(doubled, vec![8, 2, 6]);
    }

    #[test]
    fn a_failing_point_is_tagged_without_stopping_the_sweep() {
        let sweep: Sweep<i32, i32, &str> = run_unobserved([1, 2, 3], |&value| {
            if value == 2 { Err("diverged") } else { Ok(value) }
        });

        assert_eq!(sweep.status, Status::Complete);
        assert_eq!(sweep.points.len(), 3);
        assert!(sweep.points[0].outcome.is_ok());
        assert!(sweep.points[1].outcome.is_err());
        assert!(sweep.points[2].outcome.is_ok());
        assert_eq!(sweep.successes().count(), 2);
        assert_eq!(sweep.failures().count(), 1);
    }

    #[test]
    fn an_observer_can_stop_the_sweep_early() {
        let sweep: Sweep<i32, i32, &str> = run(
            [10, 20, 30, 40],
            |&value| Ok(value),
            |event: &Event<i32>| {
                if event.index >= 1 {
                    Some(Action::StopEarly)
                } else {
                    None
                }
            },
        );

        assert_eq!(sweep.status, Status::StoppedByObserver);
        assert_eq!(sweep.points.len(), 2);
    }

    #[test]
    fn events_report_each_outcome_as_it_lands() {
        let mut seen = Vec::new();
        let _sweep: Sweep<i32, i32, &str> = run(
            [5, 6],
            |&value| if value == 6 { Err("diverged") } else { Ok(value) },
            |event: &Event<i32>| {
                seen.push((event.index, event.value, event.ok));
                None
            },
        );

        assert_eq!(seen, vec![(0, 5, true), (1, 6, false)]);
    }

    #[test]
    fn an_empty_sweep_completes_immediately() {
        let sweep: Sweep<i32, i32, &str> = run_unobserved([], |&value| Ok(value));

        assert_eq!(sweep.status, Status::Complete);
        assert!(sweep.points.is_empty());
    }
}
