pub mod audit;
pub mod load;
