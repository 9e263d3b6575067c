mod driver;
mod error;
mod health;
pub use driver::*;
pub use error::*;
pub use health::*;
