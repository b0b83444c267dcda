use std::fs;
use std::path::{Path, PathBuf};

use apkraster::{
    CancelToken, CollisionPolicy, ConversionParams, DegeneratePolicy, Error, FileStatus,
    OutputFormat, convert, convert_file, discover_inputs, process_directory_to_path,
    process_paths,
};

fn pseudo_random_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(747796405).wrapping_add(2891336453);
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            (state >> 24) as u8
        })
        .collect()
}

fn write_file(path: &Path, bytes: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
    path.to_path_buf()
}

#[test]
fn single_file_becomes_128x128_rgb_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(&dir.path().join("app.apk"), &pseudo_random_bytes(3000, 1));
    let out_dir = dir.path().join("out/nested");

    let written = convert(&input, &out_dir, &ConversionParams::default()).unwrap();
    assert_eq!(written, out_dir.join("app.png"));

    let decoded = image::open(&written).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (128, 128));

    let in_memory = convert_file(&input, &ConversionParams::default()).unwrap();
    assert_eq!(decoded.as_raw(), in_memory.as_raw());
}

#[test]
fn tiff_output_is_lossless_rgb8() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(&dir.path().join("app.apk"), &pseudo_random_bytes(500, 2));
    let params = ConversionParams {
        format: OutputFormat::Tiff,
        ..ConversionParams::default()
    };

    let written = convert(&input, dir.path(), &params).unwrap();
    assert_eq!(written.extension().unwrap(), "tiff");

    let mut decoder = tiff::decoder::Decoder::new(fs::File::open(&written).unwrap()).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (128, 128));
    assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::RGB(8));
    match decoder.read_image().unwrap() {
        tiff::decoder::DecodingResult::U8(data) => {
            let expected = convert_file(&input, &params).unwrap();
            assert_eq!(data, expected.as_raw());
        }
        _ => panic!("expected 8-bit samples"),
    }
}

#[test]
fn identical_content_gives_identical_images() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = pseudo_random_bytes(12345, 3);
    let a = write_file(&dir.path().join("a.apk"), &bytes);
    let b = write_file(&dir.path().join("b.apk"), &bytes);

    let out_a = convert(&a, &dir.path().join("out"), &ConversionParams::default()).unwrap();
    let out_b = convert(&b, &dir.path().join("out"), &ConversionParams::default()).unwrap();
    assert_eq!(fs::read(out_a).unwrap(), fs::read(out_b).unwrap());
}

#[test]
fn empty_and_missing_files_report_typed_errors() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write_file(&dir.path().join("empty.apk"), &[]);
    let params = ConversionParams::default();

    assert!(matches!(
        convert(&empty, dir.path(), &params),
        Err(Error::EmptyInput)
    ));
    assert!(matches!(
        convert(&dir.path().join("missing.apk"), dir.path(), &params),
        Err(Error::Io(_))
    ));
    assert!(!dir.path().join("empty.png").exists());
}

#[test]
fn discovery_is_flat_or_recursive() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("top.apk"), &[1, 2]);
    write_file(&root.join("UPPER.APK"), &[1, 2]);
    write_file(&root.join("notes.txt"), &[1, 2]);
    write_file(&root.join("sub/inner.apk"), &[1, 2]);
    write_file(&root.join("sub/deeper/deep.apk"), &[1, 2]);

    let flat = discover_inputs(root, "apk", false).unwrap();
    assert_eq!(flat, vec![root.join("UPPER.APK"), root.join("top.apk")]);

    let recursive = discover_inputs(root, "apk", true).unwrap();
    assert_eq!(
        recursive,
        vec![
            root.join("UPPER.APK"),
            root.join("sub/deeper/deep.apk"),
            root.join("sub/inner.apk"),
            root.join("top.apk"),
        ]
    );
}

#[cfg(unix)]
#[test]
fn recursive_discovery_does_not_follow_directory_symlinks() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("sub/a.apk"), &pseudo_random_bytes(64, 8));
    std::os::unix::fs::symlink(root, root.join("sub/loop")).unwrap();

    let found = discover_inputs(root, "apk", true).unwrap();
    assert_eq!(found, vec![root.join("sub/a.apk")]);

    let report = process_directory_to_path(
        root,
        &dir.path().join("out"),
        &ConversionParams {
            recursive: true,
            collision: CollisionPolicy::Disambiguate,
            ..ConversionParams::default()
        },
        &CancelToken::new(),
        None,
    )
    .unwrap();
    assert_eq!(report.total, 1);
    assert_eq!(report.converted, 1);
    assert!(!dir.path().join("out/a-1.png").exists());
}

#[cfg(unix)]
#[test]
fn symlinked_files_are_still_discovered() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let real = write_file(&root.join("store/real.bin"), &[1, 2, 3]);
    fs::create_dir_all(root.join("in")).unwrap();
    std::os::unix::fs::symlink(&real, root.join("in/linked.apk")).unwrap();

    let found = discover_inputs(&root.join("in"), "apk", false).unwrap();
    assert_eq!(found, vec![root.join("in/linked.apk")]);
}

#[test]
fn batch_continues_past_per_file_failures() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let out_dir = dir.path().join("out");
    write_file(&input_dir.join("good.apk"), &pseudo_random_bytes(2048, 4));
    write_file(&input_dir.join("empty.apk"), &[]);
    write_file(&input_dir.join("constant.apk"), &[0x41; 64]);
    write_file(&input_dir.join("also_good.apk"), &pseudo_random_bytes(99, 5));

    let report = process_directory_to_path(
        &input_dir,
        &out_dir,
        &ConversionParams::default(),
        &CancelToken::new(),
        None,
    )
    .unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.converted, 2);
    assert_eq!(report.failed, 2);
    assert_eq!(report.cancelled, 0);
    assert!(!report.is_success());
    assert!(out_dir.join("good.png").exists());
    assert!(out_dir.join("also_good.png").exists());

    let empty = report
        .outcomes
        .iter()
        .find(|o| o.input.ends_with("empty.apk"))
        .unwrap();
    assert!(matches!(empty.error, Some(Error::EmptyInput)));

    // 64 identical bytes fill an 8x8 grid exactly, so the std is zero
    let constant = report
        .outcomes
        .iter()
        .find(|o| o.input.ends_with("constant.apk"))
        .unwrap();
    assert!(matches!(constant.error, Some(Error::DegenerateInput { .. })));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["failed"], 2);
    assert_eq!(json["outcomes"].as_array().unwrap().len(), 4);
}

#[test]
fn zero_fill_policy_writes_black_image() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(&dir.path().join("zeros.apk"), &[0, 0, 0, 0]);
    let params = ConversionParams {
        degenerate: DegeneratePolicy::ZeroFill,
        ..ConversionParams::default()
    };

    let written = convert(&input, dir.path(), &params).unwrap();
    let decoded = image::open(written).unwrap().to_rgb8();
    assert!(decoded.as_raw().iter().all(|&v| v == 0));
}

#[test]
fn recursive_batch_detects_name_collisions() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("in");
    write_file(&input_dir.join("x/app.apk"), &pseudo_random_bytes(400, 6));
    write_file(&input_dir.join("y/app.apk"), &pseudo_random_bytes(400, 7));

    let mut params = ConversionParams {
        recursive: true,
        ..ConversionParams::default()
    };
    let out_fail = dir.path().join("out_fail");
    let report =
        process_directory_to_path(&input_dir, &out_fail, &params, &CancelToken::new(), None)
            .unwrap();
    assert_eq!(report.converted, 1);
    assert_eq!(report.failed, 1);
    let collided = report.failures().next().unwrap();
    assert!(collided.input.ends_with("y/app.apk"));
    assert!(matches!(collided.error, Some(Error::OutputCollision { .. })));

    // The surviving image belongs to the first input in sorted order
    let expected = convert_file(&input_dir.join("x/app.apk"), &params).unwrap();
    let decoded = image::open(out_fail.join("app.png")).unwrap().to_rgb8();
    assert_eq!(decoded.as_raw(), expected.as_raw());

    params.collision = CollisionPolicy::Disambiguate;
    let out_dis = dir.path().join("out_dis");
    let report =
        process_directory_to_path(&input_dir, &out_dis, &params, &CancelToken::new(), None)
            .unwrap();
    assert_eq!(report.converted, 2);
    assert!(out_dis.join("app.png").exists());
    assert!(out_dis.join("app-1.png").exists());
}

#[test]
fn cancelled_batch_converts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<PathBuf> = (0..3)
        .map(|i| {
            write_file(
                &dir.path().join(format!("in/f{}.apk", i)),
                &pseudo_random_bytes(100, i),
            )
        })
        .collect();
    let out_dir = dir.path().join("out");

    let cancel = CancelToken::new();
    cancel.cancel();
    let report = process_paths(
        &inputs,
        &out_dir,
        &ConversionParams::default(),
        &cancel,
        None,
    )
    .unwrap();

    assert_eq!(report.cancelled, 3);
    assert_eq!(report.converted, 0);
    assert!(
        report
            .outcomes
            .iter()
            .all(|o| o.status == FileStatus::Cancelled)
    );
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[test]
fn batch_with_progress_monitor_finishes() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<PathBuf> = (0..6)
        .map(|i| {
            write_file(
                &dir.path().join(format!("in/f{}.apk", i)),
                &pseudo_random_bytes(1000 + i as usize * 100, i),
            )
        })
        .collect();
    let params = ConversionParams {
        jobs: 2,
        ..ConversionParams::default()
    };

    let report = process_paths(
        &inputs,
        &dir.path().join("out"),
        &params,
        &CancelToken::new(),
        Some(std::time::Duration::from_millis(1)),
    )
    .unwrap();
    assert_eq!(report.converted, 6);
    assert!(report.is_success());
    assert!(report.started_at.is_some());
}
