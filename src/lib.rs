pub mod board;
pub mod confidence;
pub mod config;
pub mod consts;
pub mod deduction;
pub mod error;
pub mod explore;
pub mod policy;
pub mod risk;
