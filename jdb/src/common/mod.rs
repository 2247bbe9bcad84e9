mod constants;
mod lock;
mod sort_order;
mod time;
mod types;
mod value;

pub use constants::*;
pub use lock::*;
pub use sort_order::*;
pub use time::*;
pub use types::*;
pub use value::*;
