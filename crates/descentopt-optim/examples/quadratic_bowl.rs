//! Minimizes the 2-dimensional quadratic bowl with all three optimizers.
//!
//! Run with iteration logging enabled:
//!
//! ```text
//! RUST_LOG=debug cargo run --example quadratic_bowl
//! ```

use descentopt_core::objective::QuadraticObjective;
use descentopt_core::optimizer::Optimizer;
use descentopt_core::params::OptimizerParameters;
use descentopt_core::types::Point;
use descentopt_optim::{BacktrackingGradientDescent, ConjugateGradient, GradientDescent};

fn main() {
    env_logger::init();

    let start = Point::from_vec(vec![10.0, 10.0]);
    let params = OptimizerParameters::new().with("max_steps", 1000usize);

    let optimizers: Vec<Box<dyn Optimizer<f64>>> = vec![
        Box::new(GradientDescent::<QuadraticObjective>::with_parameters(
            params.clone(),
        )),
        Box::new(
            BacktrackingGradientDescent::<QuadraticObjective>::with_parameters(params.clone()),
        ),
        Box::new(ConjugateGradient::<QuadraticObjective>::with_parameters(
            params,
        )),
    ];

    for optimizer in &optimizers {
        match optimizer.optimize(&start) {
            Ok(result) => println!(
                "{:32} f = {:.3e} at {:?} after {} iterations ({:?})",
                optimizer.name(),
                result.value,
                result.point.as_slice(),
                result.iterations,
                result.termination_reason,
            ),
            Err(e) => eprintln!("{} failed: {e}", optimizer.name()),
        }
    }
}
