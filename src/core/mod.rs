pub mod codec;
pub mod emit;
pub mod error;
pub mod scan;
pub mod table;
pub mod value;
