pub mod endpoint;
pub mod error;

pub use endpoint::{listen, Endpoint, Listener, NetFamily};
pub use error::NetError;
