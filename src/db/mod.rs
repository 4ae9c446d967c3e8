pub mod audit;
pub mod initialize;
pub mod kv;
pub mod migrate;
pub mod pool;
