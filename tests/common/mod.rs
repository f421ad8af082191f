#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub const BEL_HEADER: &str =
    "  time [days]  mass [Msun]  a [AU]  e  i [deg]  omega [deg]  mean anomaly [deg]  name\n";

/// Fixture directory of the crate.
pub fn data_path(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Write `contents` to `name` inside a fresh temporary directory.
///
/// The directory is removed when the returned [`TempDir`] is dropped.
pub fn write_result_file(name: &str, contents: &str) -> (TempDir, Utf8PathBuf) {
    let dir = TempDir::new().expect("temporary directory should be created");
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("temp path is UTF-8");
    std::fs::write(&path, contents).expect("result file should be written");
    (dir, path)
}

/// One orbital-element record, fields laid out as the integrator writes them.
pub fn bel_record(time: f64, a: f64, e: f64, i: f64, omega: f64, name: &str) -> String {
    format!(
        "  {time:15.8E}  1.00000000E-03  {a:15.8E}  {e:15.8E}  {i:15.8E}  {omega:15.8E}  0.00000000E+00  {name}\n"
    )
}
