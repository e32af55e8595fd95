//! End-to-end scenarios covering everyday filesystem usage.

mod common;

use common::Fixture;

#[test]
fn scenario_1_root_pwd() {
    let fixture = Fixture::new();
    assert_eq!(fixture.fs.pwd(), "/");
    assert!(fixture.fs.ls(".").is_empty());
}

#[test]
fn scenario_2_nested_mkdir_and_ls_by_file_path() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("folder1"));
    assert!(fixture.fs.mkdir("folder2"));
    assert!(fixture.fs.mkdir("/folder2/folder1"));
    assert!(fixture.fs.cd("folder2"));

    let listing = fixture.fs.ls(".");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, 3);
    assert_eq!(listing[0].parent_id, Some(2));
    assert_eq!(listing[0].name, "folder1");

    assert!(fixture.fs.write("test.txt", b"random test data", "raw"));

    let file_listing = fixture.fs.ls("test.txt");
    assert_eq!(file_listing.len(), 1);
    let file = &file_listing[0];
    assert_eq!(file.id, 4);
    assert_eq!(file.parent_id, Some(2));
    assert_eq!(file.name, "test.txt");
    assert_eq!(file.size_stored, Some(16));
    assert_eq!(file.size_raw, Some(16));
    assert_eq!(file.codec.as_deref(), Some("raw"));
    assert!(file.is_file());
}

#[test]
fn scenario_3_remove_current_directory_resets_cwd() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("f1"));
    assert!(fixture.fs.cd("f1"));
    assert!(fixture.fs.rm("/f1"));
    assert_eq!(fixture.fs.pwd(), "/");
}

#[test]
fn scenario_4_move_to_trailing_slash_destination() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("f1"));
    assert!(fixture.fs.mkdir("f5"));
    assert!(fixture.fs.write("/f1/test.txt", b"payload", "raw"));

    assert!(fixture.fs.cp("/f1/test.txt", "/f1/test5.txt"));
    assert!(!fixture.fs.mv("/f1/test5.txt", "/f5"));
    assert!(fixture.fs.mv("/f1/test5.txt", "/f5/"));
    assert_eq!(fixture.fs.read("/f5/test5.txt"), b"payload");
}

#[test]
fn scenario_5_copy_directory_rejected() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("f1"));
    assert!(fixture.fs.mkdir("f2"));
    assert!(!fixture.fs.cp("/f1", "/f2"));
}

#[test]
fn scenario_6_composed_codec_round_trips() {
    let fixture = Fixture::new();
    fixture.fs.register_encode("reverse", |_, bytes| bytes.iter().rev().copied().collect());
    fixture.fs.register_decode("reverse", |_, bytes| bytes.iter().rev().copied().collect());
    fixture.fs.register_encode("complex", |reg, bytes| reg.call_encode("reverse", bytes));
    fixture.fs.register_decode("complex", |reg, bytes| reg.call_decode("reverse", bytes));

    let payload = b"composed codec payload".to_vec();
    assert!(fixture.fs.write("doc.bin", &payload, "complex"));
    assert_eq!(fixture.fs.read("doc.bin"), payload);
}

#[test]
fn write_never_overwrites() {
    let fixture = Fixture::new();
    assert!(fixture.fs.write("once.txt", b"first", "raw"));
    assert!(!fixture.fs.write("once.txt", b"second", "raw"));
    assert_eq!(fixture.fs.read("once.txt"), b"first");
    assert!(!fixture.fs.error().is_empty());
}

#[test]
fn rm_of_root_is_rejected() {
    let fixture = Fixture::new();
    assert!(!fixture.fs.rm("/"));
}

#[test]
fn rm_of_root_via_dotdot_is_rejected() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("f1"));
    assert!(!fixture.fs.rm(".."));
    assert!(!fixture.fs.rm("/.."));
    assert!(!fixture.fs.rm("//"));
    // the root and its child must both have survived every rejected call
    assert_eq!(fixture.fs.ls(".").len(), 1);
}

#[test]
fn cd_into_file_fails() {
    let fixture = Fixture::new();
    assert!(fixture.fs.write("file.txt", b"data", "raw"));
    assert!(!fixture.fs.cd("file.txt"));
}

#[test]
fn mv_cycle_is_rejected() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("parent"));
    assert!(fixture.fs.mkdir("/parent/child"));
    assert!(!fixture.fs.mv("/parent", "/parent/child/escaped"));
}

#[test]
fn mv_onto_existing_directory_is_rejected() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("f1"));
    assert!(fixture.fs.mkdir("f2"));
    assert!(fixture.fs.write("/f1/file.txt", b"data", "raw"));
    // "f2" exists as a directory, not a file: must still be rejected cleanly
    // rather than falling through to a raw unique-constraint failure.
    assert!(!fixture.fs.mv("/f1/file.txt", "/f2"));
    assert!(!fixture.fs.cp("/f1/file.txt", "/f2"));
}

#[test]
fn pwd_reflects_actual_nesting_after_move_under_a_newer_directory() {
    let fixture = Fixture::new();
    // "early" gets a lower id than "later"; moving early under later means
    // id order and path order disagree, which is exactly what the absolute
    // path query must not rely on.
    assert!(fixture.fs.mkdir("early"));
    assert!(fixture.fs.mkdir("later"));
    assert!(fixture.fs.mv("/early", "/later/"));
    assert!(fixture.fs.cd("/later/early"));
    assert_eq!(fixture.fs.pwd(), "/later/early");
}

#[test]
fn cascade_delete_removes_descendants_and_blobs() {
    let fixture = Fixture::new();
    assert!(fixture.fs.mkdir("dir"));
    assert!(fixture.fs.write("/dir/a.txt", b"aaa", "raw"));
    assert!(fixture.fs.write("/dir/b.txt", b"bbb", "raw"));
    assert!(fixture.fs.rm("/dir"));
    assert!(fixture.fs.ls(".").is_empty());
    assert!(fixture.fs.read("/dir/a.txt").is_empty());
}
