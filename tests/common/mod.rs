use std::sync::Once;

use sqltreefs::Filesystem;
use tempfile::TempDir;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_env_filter("trace").with_test_writer().try_init();
    });
}

/// Scratch database fixture: a fresh `Filesystem` backed by a tempdir that
/// is cleaned up when the fixture is dropped.
pub struct Fixture {
    pub fs: Filesystem,
    _dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let dir = TempDir::new().expect("create tempdir");
        let db_path = dir.path().join("fs.db");
        let fs = Filesystem::open(&db_path).expect("open filesystem");
        Fixture { fs, _dir: dir }
    }
}
