pub mod ast;
pub mod delimiter;
pub mod program;
pub mod span;
