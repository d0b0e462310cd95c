pub mod explore;
pub mod solve;
