pub mod network;
pub mod recurrent;
pub mod spec;

pub use network::Network;
pub use recurrent::RecurrentState;
pub use spec::{NetworkSpec, REFERENCE_INIT_SCALE};
