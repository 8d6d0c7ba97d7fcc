pub mod concurrent_loader;
pub mod csv_loader;
pub mod dataset_loader;

pub use concurrent_loader::load_dataset_concurrently;
pub use csv_loader::CsvDatasetLoader;
pub use dataset_loader::{Dataset, DatasetLoader, DatasetRecords};
