pub mod change;
pub mod script;

pub use change::Change;
