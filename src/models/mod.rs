pub mod conversation;
pub mod enums;
pub mod medicine;
pub mod nutrition;

pub use conversation::*;
pub use enums::*;
pub use medicine::*;
pub use nutrition::*;
