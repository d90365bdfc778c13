mod models;
mod pool;

pub use models::{Application, NewApplication};
pub use pool::{create_pool, DbPool};
