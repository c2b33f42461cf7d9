pub mod criteria;
pub mod indicator;
pub mod ranked;
pub mod universe;

pub use criteria::*;
pub use indicator::*;
pub use ranked::*;
pub use universe::*;
