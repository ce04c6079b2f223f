pub mod address;
pub mod release;
