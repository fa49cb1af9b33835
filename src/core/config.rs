use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: PathBuf,

    // Fixed worker pool size for the Dispatcher
    pub num_workers: usize,

    // Thread count for the batch processor
    pub processor_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_path: PathBuf::from("./data/store.json"),
            num_workers: 4,
            processor_threads: num_cpus::get(),
        }
    }
}
