pub mod event;
pub mod reducer;
pub mod state;

pub use event::*;
pub use reducer::reduce;
pub use state::*;
