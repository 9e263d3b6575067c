mod debug;
mod health;
mod upload;
pub use debug::*;
pub use health::*;
pub use upload::*;
