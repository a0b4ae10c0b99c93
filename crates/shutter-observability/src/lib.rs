mod blockchain;
mod network;
mod sync;

pub use blockchain::*;
pub use network::*;
pub use sync::*;
