//! Control law: the relay humidistat and its presentation helpers.

pub mod humidistat;
pub mod mode;
pub mod status;

pub use humidistat::{Humidistat, Settings, UNSET_HUMIDITY};
pub use mode::Mode;
