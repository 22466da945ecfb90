//! End-to-end properties shared by the three optimizers.

use descentopt_core::objective::QuadraticObjective;
use descentopt_core::optimizer::{Optimizer, TerminationReason};
use descentopt_core::params::OptimizerParameters;
use descentopt_core::test_objectives::{ConstantObjective, CountingObjective};
use descentopt_core::types::Point;
use descentopt_optim::{
    BacktrackingGradientDescent, ConjugateGradient, GradientDescent, OptimizationError,
};
use pretty_assertions::assert_eq;

fn bowl_start() -> Point<f64> {
    Point::from_vec(vec![10.0, 10.0])
}

/// All three algorithms find the minimum of the 2-dimensional quadratic bowl
/// from the same starting point.
#[test]
fn test_all_algorithms_converge_on_quadratic_bowl() {
    let optimizers: Vec<Box<dyn Optimizer<f64>>> = vec![
        Box::new(GradientDescent::<QuadraticObjective>::new()),
        Box::new(BacktrackingGradientDescent::<QuadraticObjective>::new()),
        Box::new(ConjugateGradient::<QuadraticObjective>::new()),
    ];

    for optimizer in &optimizers {
        let result = optimizer.optimize(&bowl_start()).unwrap_or_else(|e| {
            panic!("{} failed on the quadratic bowl: {e}", optimizer.name())
        });
        assert!(
            result.point.norm() < 1e-3,
            "{} ended at {:?}",
            optimizer.name(),
            result.point.as_slice()
        );
        assert!(result.value < 1e-6, "{}", optimizer.name());
        assert!(result.iterations <= 5000, "{}", optimizer.name());
    }
}

/// The final value never exceeds the starting value: no algorithm ever adopts
/// a worse point.
#[test]
fn test_final_value_never_worse_than_start() {
    let starts = [
        Point::from_vec(vec![1.0, -1.0]),
        Point::from_vec(vec![100.0, 0.5]),
        Point::from_vec(vec![-3.0, 7.0]),
    ];
    let optimizers: Vec<Box<dyn Optimizer<f64>>> = vec![
        Box::new(GradientDescent::<QuadraticObjective>::new()),
        Box::new(BacktrackingGradientDescent::<QuadraticObjective>::new()),
        Box::new(ConjugateGradient::<QuadraticObjective>::new()),
    ];

    for start in &starts {
        let starting_value = start.norm_squared();
        for optimizer in &optimizers {
            let result = optimizer.optimize(start).unwrap();
            assert!(
                result.value <= starting_value,
                "{} worsened {} -> {}",
                optimizer.name(),
                starting_value,
                result.value
            );
        }
    }
}

/// Identical inputs produce bit-identical results; there is no randomness
/// anywhere in the core.
#[test]
fn test_repeated_runs_are_bit_identical() {
    let params = || {
        OptimizerParameters::new()
            .with("max_steps", 200usize)
            .with("bt_beta", 0.9)
    };

    let first = ConjugateGradient::<QuadraticObjective>::with_parameters(params())
        .optimize(&bowl_start())
        .unwrap();
    let second = ConjugateGradient::<QuadraticObjective>::with_parameters(params())
        .optimize(&bowl_start())
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.value.to_bits(), second.value.to_bits());
    for (a, b) in first.point.iter().zip(second.point.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }

    let first = GradientDescent::<QuadraticObjective>::new()
        .optimize(&bowl_start())
        .unwrap();
    let second = GradientDescent::<QuadraticObjective>::new()
        .optimize(&bowl_start())
        .unwrap();
    assert_eq!(first, second);
}

/// `max_steps = 1` stops after a single gradient evaluation and one
/// candidate-selection pass.
#[test]
fn test_max_steps_one_bounds_evaluations() {
    let objective = CountingObjective::new();
    let optimizer = GradientDescent::from_objective_with_parameters(
        &objective,
        OptimizerParameters::new().with("max_steps", 1usize),
    );

    let result = optimizer.optimize(&bowl_start()).unwrap();
    assert_eq!(result.iterations, 1);
    assert_eq!(result.termination_reason, TerminationReason::MaxSteps);
    assert_eq!(objective.gradient_evaluations(), 1);
    // Starting value plus the three trial candidates.
    assert_eq!(objective.value_evaluations(), 4);
}

/// A zero-gradient objective terminates within
/// `no_improvement_steps_to_terminate` iterations regardless of `max_steps`.
#[test]
fn test_constant_objective_terminates_within_counter() {
    let start = Point::from_vec(vec![5.0, -5.0, 0.5]);

    let gd = GradientDescent::<ConstantObjective<f64>>::new();
    let bt = BacktrackingGradientDescent::<ConstantObjective<f64>>::new();
    let cg = ConjugateGradient::<ConstantObjective<f64>>::new();

    for (name, result) in [
        ("gd", gd.optimize(&start).unwrap()),
        ("bt", bt.optimize(&start).unwrap()),
        ("cg", cg.optimize(&start).unwrap()),
    ] {
        assert_eq!(
            result.termination_reason,
            TerminationReason::NoImprovement,
            "{name}"
        );
        assert!(result.iterations <= 2, "{name}: {}", result.iterations);
        // The position never moves off the start.
        assert_eq!(result.point, start, "{name}");
    }
}

/// An objective whose gradient is infinite in every component fails plain
/// gradient descent on the very first iteration; the backtracking algorithms
/// degrade quietly instead.
#[test]
fn test_infinite_gradient_failure_asymmetry() {
    use descentopt_core::test_objectives::InfiniteGradientObjective;

    let start = Point::from_vec(vec![1.0, 1.0]);

    let gd = GradientDescent::<InfiniteGradientObjective>::new();
    match gd.optimize(&start) {
        Err(OptimizationError::NoValidCandidate { iteration }) => assert_eq!(iteration, 0),
        other => panic!("expected NoValidCandidate, got {other:?}"),
    }

    // The same objective does not error through the backtracking path: each
    // line search exhausts its budget, returns the last-tried point, and the
    // run grinds on to its step ceiling.
    let bt = BacktrackingGradientDescent::<InfiniteGradientObjective>::with_parameters(
        OptimizerParameters::new().with("max_steps", 25usize),
    );
    let result = bt.optimize(&start).unwrap();
    assert_eq!(result.termination_reason, TerminationReason::MaxSteps);
    assert_eq!(result.iterations, 25);
}

/// Parameter overrides steer termination: a huge `grad_eps` with
/// `min_steps = 0` triggers the gradient-norm early stop on the first
/// iteration of both backtracking-based algorithms.
#[test]
fn test_gradient_norm_override_terminates_first_iteration() {
    let params = || {
        OptimizerParameters::new()
            .with("min_steps", 0usize)
            .with("grad_eps", 1e10)
    };

    let bt = BacktrackingGradientDescent::<QuadraticObjective>::with_parameters(params());
    let result = bt.optimize(&bowl_start()).unwrap();
    assert_eq!(result.termination_reason, TerminationReason::SmallGradient);
    assert_eq!(result.iterations, 0);
    assert_eq!(result.point, bowl_start());

    let cg = ConjugateGradient::<QuadraticObjective>::with_parameters(params());
    let result = cg.optimize(&bowl_start()).unwrap();
    assert_eq!(result.termination_reason, TerminationReason::SmallGradient);
    assert_eq!(result.iterations, 1);
}

/// Unknown parameter names are silently ignored.
#[test]
fn test_unknown_parameter_names_are_ignored() {
    let optimizer = GradientDescent::<QuadraticObjective>::with_parameters(
        OptimizerParameters::new()
            .with("definitely_not_a_parameter", 42.0)
            .with("momentum", 0.9),
    );
    let result = optimizer.optimize(&bowl_start()).unwrap();
    assert!(result.point.norm() < 1e-3);
}
