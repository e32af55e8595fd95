//! Concurrent-copy property: many OS threads hammering
//! the same [`Filesystem`] through its single mutex never corrupt a read,
//! and every successful copy produces a byte-identical destination.

mod common;

use std::sync::Arc;
use std::thread;

use common::Fixture;

#[test]
fn concurrent_copy_and_read_stays_consistent() {
    let fixture = Fixture::new();
    let payload = b"shared source payload".to_vec();
    assert!(fixture.fs.write("source.txt", &payload, "raw"));

    let fs = Arc::new(fixture.fs);
    const THREADS: usize = 8;
    const ITERATIONS: usize = 25;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let fs = Arc::clone(&fs);
            let payload = payload.clone();
            thread::spawn(move || {
                for i in 0..ITERATIONS {
                    let dest = format!("copy-{t}-{i}.txt");
                    assert!(fs.cp("source.txt", &dest), "copy {dest} failed: {}", fs.error());
                    let read_back = fs.read(&dest);
                    assert_eq!(read_back, payload, "copy {dest} read back corrupted bytes");

                    let source_read = fs.read("source.txt");
                    assert_eq!(source_read, payload, "concurrent readers corrupted the shared source");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let listing = fs.ls(".");
    // source.txt plus one copy per (thread, iteration) pair.
    assert_eq!(listing.len(), 1 + THREADS * ITERATIONS);
}

#[test]
fn concurrent_writes_to_distinct_paths_all_land() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("incoming"));
    let fs = Arc::new(fixture.fs);

    const THREADS: usize = 6;
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || {
                let path = format!("/incoming/worker-{t}.txt");
                let body = format!("payload from worker {t}");
                assert!(fs.write(&path, body.as_bytes(), "raw"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let listing = fs.ls("/incoming");
    assert_eq!(listing.len(), THREADS);
}
