//! Bounded batch execution
//!
//! Each input is handled by exactly one job on a fixed-size pool. Jobs
//! report `(index, outcome)` over a channel and the runner writes every
//! outcome into a slot reserved for its index, so output order never
//! depends on completion order.

use crate::error::{EngineError, Result};

/// Fixed-size worker pool applying one job per input
#[derive(Debug)]
pub struct BatchRunner {
    max_workers: usize,
}

impl BatchRunner {
    /// Create a runner with `max_workers` threads
    pub fn new(max_workers: usize) -> Result<Self> {
        if max_workers == 0 {
            return Err(EngineError::InvalidConfig(
                "max_workers must be greater than 0".into(),
            ));
        }
        Ok(Self { max_workers })
    }

    /// Configured worker count
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Run `job` on every input, failing on the first error observed
    ///
    /// All jobs run to completion before this returns; results of other
    /// jobs are discarded when one fails.
    pub fn run<I, T, F>(&self, inputs: &[I], job: F) -> Result<Vec<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> Result<T> + Sync,
    {
        self.run_isolated(inputs, job).into_iter().collect()
    }

    /// Run `job` on every input, keeping each outcome in its slot
    pub fn run_isolated<I, T, F>(&self, inputs: &[I], job: F) -> Vec<Result<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> Result<T> + Sync,
    {
        if inputs.is_empty() {
            return Vec::new();
        }
        match self.execute(inputs, &job) {
            Ok(outcomes) => outcomes,
            Err(err) => inputs.iter().map(|_| Err(err.clone())).collect(),
        }
    }

    #[cfg(feature = "parallel")]
    fn execute<I, T, F>(&self, inputs: &[I], job: &F) -> Result<Vec<Result<T>>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> Result<T> + Sync,
    {
        use std::sync::mpsc;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers.min(inputs.len()))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        let (tx, rx) = mpsc::channel();
        pool.scope(|scope| {
            for (index, input) in inputs.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    log::trace!("batch job {index} started");
                    let outcome = job(input);
                    log::trace!("batch job {index} finished");
                    // The receiver outlives the scope, so the send cannot fail
                    let _ = tx.send((index, outcome));
                });
            }
        });
        drop(tx);

        let mut slots: Vec<Option<Result<T>>> = inputs.iter().map(|_| None).collect();
        for (index, outcome) in rx {
            slots[index] = Some(outcome);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| EngineError::ThreadPool(format!("job {index} produced no result")))
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn execute<I, T, F>(&self, inputs: &[I], job: &F) -> Result<Vec<Result<T>>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> Result<T> + Sync,
    {
        Ok(inputs.iter().map(job).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_rejects_zero_workers() {
        assert!(matches!(
            BatchRunner::new(0),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let runner = BatchRunner::new(3).unwrap();
        let out: Vec<usize> = runner.run(&Vec::<&str>::new(), |s| Ok(s.len())).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_order_survives_out_of_order_completion() {
        let runner = BatchRunner::new(4).unwrap();
        let delays = [40u64, 0, 25, 5];
        let out = runner
            .run(&delays, |&ms| {
                thread::sleep(Duration::from_millis(ms));
                Ok(ms)
            })
            .unwrap();
        assert_eq!(out, delays);
    }

    #[test]
    fn test_every_job_runs_once() {
        let runner = BatchRunner::new(2).unwrap();
        let calls = AtomicUsize::new(0);
        let inputs: Vec<usize> = (0..50).collect();
        let out = runner
            .run(&inputs, |&n| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(n * 2)
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 50);
        assert_eq!(out[49], 98);
    }

    #[test]
    fn test_fail_fast_and_isolated() {
        let runner = BatchRunner::new(2).unwrap();
        let inputs = ["ok", "", "fine"];
        let job = |s: &&str| {
            if s.is_empty() {
                Err(EngineError::InvalidInput {
                    reason: "empty".into(),
                })
            } else {
                Ok(s.len())
            }
        };

        assert!(matches!(
            runner.run(&inputs, job),
            Err(EngineError::InvalidInput { .. })
        ));

        let isolated = runner.run_isolated(&inputs, job);
        assert_eq!(isolated.len(), 3);
        assert_eq!(isolated[0], Ok(2));
        assert!(isolated[1].is_err());
        assert_eq!(isolated[2], Ok(4));
    }
}
