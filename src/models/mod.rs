pub mod catalog;
pub mod content;
pub mod order;
pub mod shipping;
pub mod user;

pub use catalog::*;
pub use content::*;
pub use order::*;
pub use shipping::*;
pub use user::*;
