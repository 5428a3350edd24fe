pub mod clock;
pub mod hours;
pub mod revision;
pub mod time;

pub use clock::*;
pub use hours::*;
pub use revision::*;
pub use time::*;
