pub mod catalog;
pub mod rules;
pub mod scan;
pub mod sync;
pub mod util;

pub use catalog::*;
pub use rules::*;
pub use scan::*;
pub use sync::*;
pub use util::*;
