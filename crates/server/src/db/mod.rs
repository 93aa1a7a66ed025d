pub mod games;
pub mod pool;
pub mod snapshots;
