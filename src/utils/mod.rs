pub mod file;
pub mod filenames;
pub mod si_units;
pub mod sigfigs;

pub use file::FileUtils;
pub use filenames::sanitize_filename;
pub use si_units::si_scale_for_smallest;
pub use sigfigs::{DEFAULT_SIGNIFICANT_FIGURES, sigfigs};
