// Commands — the operations the interactive shell calls into.
// Each takes the shared session handle and returns plain data or an error string.
pub mod medicine;
pub mod nutrition;
pub mod settings;
pub mod symptoms;
pub mod system;
