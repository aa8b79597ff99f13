pub use error::{EspError, EspResult};
pub use flash::FlashTarget;
pub use ports::DetectedPort;

pub(crate) mod constants;
pub mod env;
pub mod error;
pub mod flash;
pub mod ports;
pub mod prompt;
pub mod runner;
pub mod toolchain;
pub(crate) mod util;
