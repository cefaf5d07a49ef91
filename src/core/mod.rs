pub mod audit;
pub mod calculator;
pub mod clock;
pub mod export;
pub mod logic;
pub mod status;
pub mod store;
pub mod tracker;
