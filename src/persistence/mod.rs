pub mod error;
pub mod files;
pub mod migration;
pub mod store;

pub use error::PersistenceResult;
pub use files::{
    atomic_write, backup_file, config_file, ensure_data_dir, init_local_dir, log_file, report_file,
    state_file,
};
pub use store::Store;
