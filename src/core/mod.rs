pub mod checkpoint;
pub mod transaction;
pub mod warning;
