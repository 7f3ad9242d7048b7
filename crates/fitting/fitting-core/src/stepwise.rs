//! Stepwise order search
//!
//! Hyndman-Khandakar style: fit a handful of starting models, then keep
//! moving to the first neighbour (one order up or down) with a strictly lower
//! AIC until no neighbour improves or the model budget runs out.

use std::collections::HashSet;

use fitting_spi::{ArimaOrder, FitError, FittedModel, Result, SearchBounds, SeasonalOrder};

use crate::estimation::{Constraint, EstimationOptions, ModelSpec};
use crate::sarima::SarimaModel;

/// ARMA orders being searched: (p, q, P, Q)
type Candidate = (usize, usize, usize, usize);

/// Starting points tried before any neighbour moves
const STARTS: [Candidate; 4] = [(2, 2, 1, 1), (0, 0, 0, 0), (1, 0, 1, 0), (0, 1, 0, 1)];

/// One automatic search over ARMA orders with fixed differencing
#[derive(Debug)]
pub struct StepwiseSearch<'a> {
    series: &'a [f64],
    d: usize,
    seasonal_d: usize,
    /// Seasonal period, 1 for a non-seasonal search
    period: usize,
    include_mean: bool,
    bounds: SearchBounds,
    options: EstimationOptions,
    visited: HashSet<Candidate>,
    attempted: usize,
}

impl<'a> StepwiseSearch<'a> {
    pub fn new(
        series: &'a [f64],
        d: usize,
        seasonal_d: usize,
        period: usize,
        bounds: SearchBounds,
        options: EstimationOptions,
    ) -> Self {
        Self {
            series,
            d,
            seasonal_d: if period > 1 { seasonal_d } else { 0 },
            period,
            include_mean: d + seasonal_d == 0,
            bounds,
            options,
            visited: HashSet::new(),
            attempted: 0,
        }
    }

    fn is_seasonal(&self) -> bool {
        self.period > 1
    }

    /// Clip a candidate to the bounds; seasonal orders collapse to zero when
    /// the search is non-seasonal
    fn clip(&self, (p, q, sp, sq): Candidate) -> Candidate {
        if self.is_seasonal() {
            (
                p.min(self.bounds.max_p),
                q.min(self.bounds.max_q),
                sp.min(self.bounds.max_seasonal_p),
                sq.min(self.bounds.max_seasonal_q),
            )
        } else {
            (p.min(self.bounds.max_p), q.min(self.bounds.max_q), 0, 0)
        }
    }

    fn spec(&self, (p, q, sp, sq): Candidate) -> ModelSpec {
        let seasonal_order = if self.is_seasonal() {
            SeasonalOrder::new(sp, self.seasonal_d, sq, self.period)
        } else {
            SeasonalOrder::none()
        };
        ModelSpec::new(ArimaOrder::new(p, self.d, q), seasonal_order, self.include_mean)
    }

    /// Fit a candidate unless it was already tried or the budget is spent
    fn evaluate(&mut self, candidate: Candidate) -> Option<SarimaModel> {
        if self.attempted >= self.bounds.max_models || !self.visited.insert(candidate) {
            return None;
        }
        self.attempted += 1;

        let spec = self.spec(candidate);
        match SarimaModel::fit(self.series, spec, Constraint::Enforced, &self.options) {
            Ok(model) => {
                tracing::debug!(
                    order = %spec.order,
                    seasonal_order = %spec.seasonal_order,
                    aic = model.aic(),
                    "candidate fitted"
                );
                Some(model)
            }
            Err(e) => {
                tracing::debug!(
                    order = %spec.order,
                    seasonal_order = %spec.seasonal_order,
                    error = %e,
                    "candidate skipped"
                );
                None
            }
        }
    }

    fn neighbours(&self, (p, q, sp, sq): Candidate) -> Vec<Candidate> {
        let mut moves: Vec<(isize, isize, isize, isize)> = vec![
            (-1, 0, 0, 0),
            (1, 0, 0, 0),
            (0, -1, 0, 0),
            (0, 1, 0, 0),
            (-1, -1, 0, 0),
            (1, 1, 0, 0),
        ];
        if self.is_seasonal() {
            moves.extend_from_slice(&[
                (0, 0, -1, 0),
                (0, 0, 1, 0),
                (0, 0, 0, -1),
                (0, 0, 0, 1),
                (0, 0, -1, -1),
                (0, 0, 1, 1),
            ]);
        }

        let step = |value: usize, delta: isize, max: usize| -> Option<usize> {
            let next = value.checked_add_signed(delta)?;
            (next <= max).then_some(next)
        };

        moves
            .into_iter()
            .filter_map(|(dp, dq, dsp, dsq)| {
                Some((
                    step(p, dp, self.bounds.max_p)?,
                    step(q, dq, self.bounds.max_q)?,
                    step(sp, dsp, self.bounds.max_seasonal_p)?,
                    step(sq, dsq, self.bounds.max_seasonal_q)?,
                ))
            })
            .collect()
    }

    /// Run the search and return the model with the lowest AIC
    pub fn run(mut self) -> Result<SarimaModel> {
        let mut best: Option<(Candidate, SarimaModel)> = None;

        for start in STARTS {
            let candidate = self.clip(start);
            if let Some(model) = self.evaluate(candidate) {
                let better = best
                    .as_ref()
                    .map_or(true, |(_, current)| model.aic() < current.aic());
                if better {
                    best = Some((candidate, model));
                }
            }
        }

        let Some((mut best_candidate, mut best_model)) = best else {
            return Err(FitError::NoViableModel {
                attempted: self.attempted,
            });
        };

        loop {
            let mut improved = false;
            for neighbour in self.neighbours(best_candidate) {
                if let Some(model) = self.evaluate(neighbour) {
                    if model.aic() < best_model.aic() {
                        best_candidate = neighbour;
                        best_model = model;
                        improved = true;
                        break;
                    }
                }
            }
            if !improved || self.attempted >= self.bounds.max_models {
                break;
            }
        }

        tracing::debug!(
            order = %best_model.order(),
            seasonal_order = %best_model.seasonal_order(),
            aic = best_model.aic(),
            attempted = self.attempted,
            "stepwise search finished"
        );
        Ok(best_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(period: usize, bounds: SearchBounds) -> StepwiseSearch<'static> {
        StepwiseSearch::new(&[], 1, 0, period, bounds, EstimationOptions::default())
    }

    #[test]
    fn test_clip_non_seasonal() {
        let s = search(1, SearchBounds::new(1, 1, 2, 2));
        assert_eq!(s.clip((2, 2, 1, 1)), (1, 1, 0, 0));
    }

    #[test]
    fn test_clip_seasonal() {
        let s = search(12, SearchBounds::new(3, 3, 0, 2));
        assert_eq!(s.clip((2, 2, 1, 1)), (2, 2, 0, 1));
    }

    #[test]
    fn test_neighbours_stay_in_bounds() {
        let s = search(1, SearchBounds::new(1, 1, 0, 0));
        let mut neighbours = s.neighbours((0, 0, 0, 0));
        neighbours.sort();
        assert_eq!(neighbours, vec![(0, 1, 0, 0), (1, 0, 0, 0), (1, 1, 0, 0)]);
    }

    #[test]
    fn test_seasonal_neighbours_include_seasonal_moves() {
        let s = search(7, SearchBounds::default());
        let neighbours = s.neighbours((1, 1, 1, 1));
        assert_eq!(neighbours.len(), 12);
        assert!(neighbours.contains(&(1, 1, 2, 2)));
        assert!(neighbours.contains(&(1, 1, 0, 0)));
    }

    #[test]
    fn test_mean_only_when_undifferenced() {
        let s = StepwiseSearch::new(&[], 0, 0, 1, SearchBounds::default(), EstimationOptions::default());
        assert!(s.include_mean);
        let s = StepwiseSearch::new(&[], 0, 1, 12, SearchBounds::default(), EstimationOptions::default());
        assert!(!s.include_mean);
    }

    #[test]
    fn test_all_candidates_failing() {
        let result = StepwiseSearch::new(
            &[1.0, 2.0],
            1,
            0,
            1,
            SearchBounds::new(2, 2, 0, 0),
            EstimationOptions::default(),
        )
        .run();
        // Even (0,1,0) needs two differenced values
        assert!(matches!(result, Err(FitError::NoViableModel { .. })));
    }

    #[test]
    fn test_finds_random_walk_for_trend() {
        let data: Vec<f64> = (0..40).map(|i| 10.0 + i as f64 * 2.5 + (i as f64 * 1.3).sin()).collect();
        let model = StepwiseSearch::new(&data, 1, 0, 1, SearchBounds::default(), EstimationOptions::default())
            .run()
            .unwrap();
        assert_eq!(model.order().d, 1);
        assert!(model.aic().is_finite());
    }

    #[test]
    fn test_respects_model_budget() {
        let data: Vec<f64> = (0..40).map(|i| (i as f64 * 0.7).sin() * 5.0 + 20.0).collect();
        let bounds = SearchBounds {
            max_models: 2,
            ..SearchBounds::default()
        };
        let mut s = StepwiseSearch::new(&data, 0, 0, 1, bounds, EstimationOptions::default());
        s.evaluate((0, 0, 0, 0));
        s.evaluate((1, 0, 0, 0));
        assert!(s.evaluate((0, 1, 0, 0)).is_none());
        assert_eq!(s.attempted, 2);
    }
}
