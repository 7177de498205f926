//! Fill executor: writes mapped values into controls through a [`FillPort`].

pub mod dom_port;
pub mod errors;
pub mod executor;
pub mod model;
pub mod policy;
pub mod ports;
pub mod strategies;
pub mod timed;

pub use dom_port::DocumentPort;
pub use errors::FillError;
pub use executor::FillExecutor;
pub use model::{ControlSnapshot, FillOutcome, FillReport, RadioChoice};
pub use policy::FillPolicy;
pub use ports::FillPort;
pub use timed::TimedTask;
