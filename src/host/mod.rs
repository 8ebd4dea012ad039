pub mod classify;
pub mod error;
pub mod function;
pub mod object;
pub mod operations;
pub mod realm;
pub mod symbol;
pub mod value;
