//! End-to-end strategy tests against real temporary files

use copybench_io::{scan_source, CopyRequest, CopyStrategy, FsCopy, StreamCopy};
use copybench_types::NullProgressSink;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[cfg(unix)]
use copybench_io::{ParallelNativeCopy, UnixNativeCopy};

fn write_patterned(path: &Path, len: usize) -> Vec<u8> {
    let content: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    fs::write(path, &content).unwrap();
    content
}

#[tokio::test]
async fn stream_copy_produces_identical_bytes_per_run() {
    let temp = TempDir::new().unwrap();
    let source_file = temp.path().join("payload.bin");
    let content = write_patterned(&source_file, 200_000);
    let destination = temp.path().join("scratch");
    fs::create_dir(&destination).unwrap();

    let source = scan_source(&source_file).unwrap();
    let strategy = StreamCopy::with_high_water_mark(4096);
    let sink = NullProgressSink;

    for run_index in 1..=2 {
        let request = CopyRequest {
            source: &source,
            destination: &destination,
            run_index,
            label: "Running test: stream 1/2",
            progress: &sink,
        };
        strategy.perform(&request).await.unwrap();
    }

    assert_eq!(
        fs::read(destination.join("payload_stream4096_1.bin")).unwrap(),
        content
    );
    assert_eq!(
        fs::read(destination.join("payload_stream4096_2.bin")).unwrap(),
        content
    );
}

#[tokio::test]
async fn stream_copy_handles_buffers_larger_than_the_file() {
    let temp = TempDir::new().unwrap();
    let source_file = temp.path().join("small.bin");
    let content = write_patterned(&source_file, 100);
    let destination = temp.path().join("scratch");
    fs::create_dir(&destination).unwrap();

    let source = scan_source(&source_file).unwrap();
    let strategy = StreamCopy::with_high_water_mark(1024 * 1024);
    let sink = NullProgressSink;

    let request = CopyRequest {
        source: &source,
        destination: &destination,
        run_index: 1,
        label: "Running test: stream 1/1",
        progress: &sink,
    };
    strategy.perform(&request).await.unwrap();

    assert_eq!(
        fs::read(destination.join("small_stream1048576_1.bin")).unwrap(),
        content
    );
}

#[tokio::test]
async fn fs_copy_flattens_directory_trees() {
    let temp = TempDir::new().unwrap();
    let source_dir = temp.path().join("data");
    fs::create_dir_all(source_dir.join("nested")).unwrap();
    let a = write_patterned(&source_dir.join("a.bin"), 1000);
    let b = write_patterned(&source_dir.join("nested/b.bin"), 2000);
    let destination = temp.path().join("scratch");
    fs::create_dir(&destination).unwrap();

    let source = scan_source(&source_dir).unwrap();
    let strategy = FsCopy::new();
    let sink = NullProgressSink;

    let request = CopyRequest {
        source: &source,
        destination: &destination,
        run_index: 1,
        label: "Running test: fs copy 1/1",
        progress: &sink,
    };
    strategy.perform(&request).await.unwrap();

    assert_eq!(fs::read(destination.join("a_fscopy_1.bin")).unwrap(), a);
    assert_eq!(fs::read(destination.join("b_fscopy_1.bin")).unwrap(), b);
}

#[cfg(unix)]
#[tokio::test]
async fn unix_native_copies_the_whole_tree() {
    let temp = TempDir::new().unwrap();
    let source_dir = temp.path().join("data");
    fs::create_dir_all(source_dir.join("nested")).unwrap();
    let a = write_patterned(&source_dir.join("a.bin"), 1000);
    let b = write_patterned(&source_dir.join("nested/b.bin"), 2000);
    let destination = temp.path().join("scratch");
    fs::create_dir(&destination).unwrap();

    let source = scan_source(&source_dir).unwrap();
    let strategy = UnixNativeCopy::new();
    assert!(strategy.can_run());
    let sink = NullProgressSink;

    let request = CopyRequest {
        source: &source,
        destination: &destination,
        run_index: 1,
        label: "Running test: native 1/1",
        progress: &sink,
    };
    strategy.perform(&request).await.unwrap();

    let copied = destination.join("data_native_1");
    assert_eq!(fs::read(copied.join("a.bin")).unwrap(), a);
    assert_eq!(fs::read(copied.join("nested/b.bin")).unwrap(), b);
}

#[cfg(unix)]
#[tokio::test]
async fn parallel_native_copies_every_file() {
    let temp = TempDir::new().unwrap();
    let source_dir = temp.path().join("data");
    fs::create_dir(&source_dir).unwrap();
    let mut contents = Vec::new();
    for index in 0..5 {
        let name = format!("file{index}.bin");
        contents.push((
            format!("file{index}_cpx3_1.bin"),
            write_patterned(&source_dir.join(&name), 500 + index * 100),
        ));
    }
    let destination = temp.path().join("scratch");
    fs::create_dir(&destination).unwrap();

    let source = scan_source(&source_dir).unwrap();
    let strategy = ParallelNativeCopy::new(3);
    assert!(strategy.can_run());
    assert_eq!(strategy.workers(), 3);
    let sink = NullProgressSink;

    let request = CopyRequest {
        source: &source,
        destination: &destination,
        run_index: 1,
        label: "Running test: parallel 1/1",
        progress: &sink,
    };
    strategy.perform(&request).await.unwrap();

    for (name, content) in contents {
        assert_eq!(fs::read(destination.join(name)).unwrap(), content);
    }
}

#[tokio::test]
async fn copy_failure_surfaces_as_copy_error() {
    let temp = TempDir::new().unwrap();
    let source_file = temp.path().join("payload.bin");
    write_patterned(&source_file, 100);
    let destination = temp.path().join("missing-scratch");

    let source = scan_source(&source_file).unwrap();
    let strategy = FsCopy::new();
    let sink = NullProgressSink;

    // destination folder was never created, so the copy must fail
    let request = CopyRequest {
        source: &source,
        destination: &destination,
        run_index: 1,
        label: "Running test: fs copy 1/1",
        progress: &sink,
    };
    let error = strategy.perform(&request).await.unwrap_err();

    assert_eq!(error.kind(), copybench_types::ErrorKind::Copy);
}
