use evobreed::logging::Stats;
use evobreed::RngSource;
use evobreed_nn::breeding::{BreedableNetwork, CrossbreedingMethod};
use evobreed_nn::training::{ExampleTrainer, TrainingConfig, TrainingExample, TrainingOutcome};

use std::error::Error;
use std::process;

use rayon::prelude::*;

const RUNS: u64 = 500;
const POPULATION_SIZE: usize = 28;
const MAX_ROUNDS: usize = 300;
const MUTATION_PROB: f64 = 0.1;
const MAX_MUTATION_MAGNITUDE: f64 = 0.6;

type RunResult = Result<Option<(usize, BreedableNetwork)>, Box<dyn Error + Send + Sync>>;

fn xor_examples() -> Vec<TrainingExample> {
    vec![
        TrainingExample::new([0.0, 0.0], [0.0]),
        TrainingExample::new([0.0, 1.0], [1.0]),
        TrainingExample::new([1.0, 0.0], [1.0]),
        TrainingExample::new([1.0, 1.0], [0.0]),
    ]
}

/// Trains one population from scratch, returning the
/// convergence round and champion if it converged.
fn run(seed: u64, method: CrossbreedingMethod) -> RunResult {
    let mut population = Vec::with_capacity(POPULATION_SIZE);
    for _ in 0..POPULATION_SIZE {
        let mut network = BreedableNetwork::new(2, &[2], 1)?;
        network.set_crossbreeding_method(method);
        population.push(network);
    }
    let config = TrainingConfig {
        training_rigor: 0.0,
        ..TrainingConfig::zero()
    };

    let mut trainer = ExampleTrainer::new(population, xor_examples(), config)?;
    let mut rng = RngSource::seeded(seed);
    match trainer.train(MAX_ROUNDS, MUTATION_PROB, MAX_MUTATION_MAGNITUDE, &mut rng)? {
        TrainingOutcome::Converged { round } => Ok(Some((round, trainer.champion().clone()))),
        TrainingOutcome::RoundLimitReached => Ok(None),
    }
}

fn main() {
    let method = match std::env::args().nth(1) {
        Some(name) => match name.parse::<CrossbreedingMethod>() {
            Ok(method) => method,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => CrossbreedingMethod::default(),
    };

    if let Err(e) = stress_test(method) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn stress_test(method: CrossbreedingMethod) -> Result<(), Box<dyn Error + Send + Sync>> {
    let results = (0..RUNS)
        .into_par_iter()
        .map(|seed| run(seed, method))
        .collect::<Result<Vec<_>, _>>()?;

    let rounds: Vec<f64> = results
        .iter()
        .filter_map(|r| r.as_ref().map(|(round, _)| *round as f64))
        .collect();
    let failures = results.len() - rounds.len();

    println!("Crossbreeding method: {}", method);
    if rounds.is_empty() {
        println!("No run converged within {} rounds", MAX_ROUNDS);
    } else {
        println!(
            "Convergence round {:?}, {}% failure rate over {} runs",
            Stats::from(rounds.iter().copied()),
            failures as f64 * 100.0 / RUNS as f64,
            RUNS
        );
    }

    let fastest = results
        .into_iter()
        .flatten()
        .min_by_key(|(round, _)| *round);
    if let Some((round, champion)) = fastest {
        println!("Fastest solution (round {}):", round);
        println!("{}", ron::to_string(&champion)?);

        let mut text = Vec::new();
        champion.write_to(&mut text)?;
        println!("{}", String::from_utf8(text)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converged_runs_solve_xor() {
        for method in [CrossbreedingMethod::ForwardPath, CrossbreedingMethod::RandomAtom] {
            if let Some((round, champion)) = run(3, method).unwrap() {
                assert!(round < MAX_ROUNDS);
                for example in xor_examples() {
                    assert_eq!(champion.run(&example.inputs), example.outputs);
                }
            }
        }
    }
}
