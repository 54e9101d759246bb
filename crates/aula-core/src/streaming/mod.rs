pub mod socket_client;
pub mod types;

pub use socket_client::SocketClient;
pub use types::{parse_frame, LiveEvent};
