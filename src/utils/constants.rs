/// Report definitions
pub const ON_TIME_THRESHOLD_MINUTES: i32 = 15;
pub const REPORT_YEAR: i32 = 2015;

/// Dataset names
pub const AIRLINES_DATASET: &str = "airlines";
pub const AIRPORTS_DATASET: &str = "airports";
pub const FLIGHTS_DATASET: &str = "flights";

/// File names
pub const AIRLINES_FILE: &str = "airlines.csv";
pub const AIRPORTS_FILE: &str = "airports.csv";
pub const FLIGHTS_FILE: &str = "flights.csv";

/// Directory names
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "FLIGHTPERF";

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
