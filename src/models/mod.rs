pub mod card;
pub mod criteria;
pub mod summary;
pub mod view;

pub use card::*;
pub use criteria::*;
pub use summary::*;
pub use view::*;
