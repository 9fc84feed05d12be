pub mod scenario;
pub mod util;

pub use util::{artifacts_dir, capture_artifacts, split_csv, url_with_fragment};
