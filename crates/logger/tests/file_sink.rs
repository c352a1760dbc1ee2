//! File sink tests. Kept in their own test binary because the sink is process-wide.

#[cfg(feature = "file-logging")]
#[test]
fn tagged_messages_go_to_file_and_verbose_does_not() {
    use logger::{close_file_logging, enable_verbose, error, info, init_file_logging, set_level, verbose, warn, Level};
    use std::fs;

    let dir = tempfile::tempdir().expect("temp dir");
    let log_path = dir.path().join("curriculum.log");

    set_level(Level::Info);
    init_file_logging(&log_path).expect("open log file");

    info!("diagram written");
    warn!("edge S1_X -> S2_Y dropped");
    error!("catalog missing");

    enable_verbose();
    verbose!("verbose line stays on stdout");

    close_file_logging();

    let contents = fs::read_to_string(&log_path).expect("read log file");
    #[cfg(feature = "log-info")]
    assert!(contents.contains("[INFO] diagram written"));
    assert!(contents.contains("[WARN] edge S1_X -> S2_Y dropped"));
    assert!(contents.contains("[ERROR] catalog missing"));
    assert!(!contents.contains("verbose line"));
}

#[cfg(feature = "file-logging")]
#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bad = dir.path().join("no-such-dir").join("x.log");
    assert!(logger::init_file_logging(&bad).is_err());
}
