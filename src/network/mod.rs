pub mod network;
pub mod state;

pub use network::Network;
pub use state::NetworkState;
