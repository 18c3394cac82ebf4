//! Generation - layout geometry and customer assembly

mod customers;
mod layout;
mod names;

pub use customers::*;
pub use layout::*;
pub use names::*;
