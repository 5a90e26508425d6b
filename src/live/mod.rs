pub mod simulator;

pub use simulator::{LiveLocationSimulator, SimulationConfig};
