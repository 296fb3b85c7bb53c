//! # evobreed-nn
//! Fixed-topology feed-forward neural networks for the
//! [`evobreed`] tournament breeding engine.
//!
//! Provides:
//! - [`FeedForwardNetwork`]: a layered network of threshold neurons,
//!   with a plain-text serialization format.
//! - [`BreedableNetwork`]: a network that remembers its generation,
//!   crossbreeding method and mutation ranges, and implements
//!   [`evobreed::Crossbreedable`] with eight crossbreeding methods.
//! - [`ExampleTrainer`]: evolves a population of breedable networks
//!   toward a set of input/output examples.
//!
//! [`FeedForwardNetwork`]: crate::networks::FeedForwardNetwork
//! [`BreedableNetwork`]: crate::breeding::BreedableNetwork
//! [`ExampleTrainer`]: crate::training::ExampleTrainer
//!
//! # Example usage: Evolution of an XOR network
//! ```
//! use evobreed::RngSource;
//! use evobreed_nn::{
//!     breeding::{BreedableNetwork, CrossbreedingMethod},
//!     networks::TopologyError,
//!     training::{ExampleTrainer, TrainingConfig, TrainingExample, TrainingOutcome},
//! };
//!
//! let examples = vec![
//!     TrainingExample::new([0.0, 0.0], [0.0]),
//!     TrainingExample::new([0.0, 1.0], [1.0]),
//!     TrainingExample::new([1.0, 0.0], [1.0]),
//!     TrainingExample::new([1.0, 1.0], [0.0]),
//! ];
//!
//! let population = (0..28)
//!     .map(|_| -> Result<BreedableNetwork, TopologyError> {
//!         let mut network = BreedableNetwork::new(2, &[2], 1)?;
//!         network.set_crossbreeding_method(CrossbreedingMethod::RandomAtom);
//!         Ok(network)
//!     })
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let config = TrainingConfig {
//!     training_rigor: 0.0,
//!     report_interval: 25,
//!     ..TrainingConfig::zero()
//! };
//! let mut trainer = ExampleTrainer::new(population, examples, config).unwrap();
//! let mut rng = RngSource::seeded(2024);
//!
//! match trainer.train(200, 0.1, 0.6, &mut rng).unwrap() {
//!     TrainingOutcome::Converged { round } => {
//!         let champion = trainer.champion();
//!         assert_eq!(champion.run(&[1.0, 0.0]), [1.0]);
//!         assert_eq!(champion.run(&[1.0, 1.0]), [0.0]);
//!         println!("Solution found in round {}", round);
//!
//!         let mut text = Vec::new();
//!         champion.write_to(&mut text).unwrap();
//!         println!("{}", String::from_utf8(text).unwrap());
//!     }
//!     TrainingOutcome::RoundLimitReached => {
//!         println!("Best error: {:?}", trainer.error_history().last());
//!     }
//! }
//! ```

pub mod breeding;
pub mod networks;
pub mod training;
