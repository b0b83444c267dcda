#![doc = r#"
apkraster — turn application packages (or any binary file) into fixed-size images.

Each input file is read as an opaque byte stream and converted to a 128x128 RGB8
raster suitable for image-based classifiers:

1. the bytes are laid out row-major in an `N x N` grid, `N = ceil(sqrt(len))`,
   zero padded and replicated across three channels;
2. the grid is z-score normalized with one global mean and standard deviation
   (padding included);
3. normalized values are truncated to integers and wrapped modulo 256 into `u8`;
4. the result is resampled to 128x128 with bilinear interpolation and written
   as a lossless PNG (or TIFF) named after the input.

The crate powers the `apkraster` CLI and can be embedded directly.

Convert one file
----------------
```rust,no_run
use std::path::Path;
use apkraster::{convert, ConversionParams};

fn main() -> apkraster::Result<()> {
    let written = convert(
        Path::new("/data/apks/sample.apk"),
        Path::new("/out"),
        &ConversionParams::default(),
    )?;
    println!("wrote {}", written.display());
    Ok(())
}
```

Convert in memory
-----------------
```rust
use apkraster::{convert_bytes, ConversionParams};

fn main() -> apkraster::Result<()> {
    let bytes: Vec<u8> = (0..=255).collect();
    let image = convert_bytes(&bytes, &ConversionParams::default())?;
    assert_eq!((image.width(), image.height(), image.channels()), (128, 128, 3));
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use std::time::Duration;
use apkraster::{process_directory_to_path, CancelToken, ConversionParams};

fn main() -> apkraster::Result<()> {
    let params = ConversionParams {
        recursive: true,
        ..ConversionParams::default()
    };
    let report = process_directory_to_path(
        Path::new("/data/apks"),
        Path::new("/out"),
        &params,
        &CancelToken::new(),
        Some(Duration::from_secs(10)),
    )?;
    println!(
        "converted={} failed={} cancelled={}",
        report.converted, report.failed, report.cancelled
    );
    Ok(())
}
```

Error handling
--------------
Per-file failures are values of `apkraster::Error`; batches record them per file
and keep going.

```rust
use apkraster::{convert_bytes, ConversionParams, DegeneratePolicy, Error};

let mut params = ConversionParams::default();
match convert_bytes(&[0, 0, 0, 0], &params) {
    Err(Error::DegenerateInput { mean }) => assert_eq!(mean, 0.0),
    other => panic!("unexpected: {other:?}"),
}

params.degenerate = DegeneratePolicy::ZeroFill;
let black = convert_bytes(&[0, 0, 0, 0], &params).unwrap();
assert!(black.as_raw().iter().all(|&v| v == 0));
```

Useful modules
--------------
- [`api`] — single-file and batch entry points, progress monitor.
- [`core`] — the pipeline stages (grid, normalize, quantize, resize, save).
- [`types`] — policies and output format enums.
- [`io`] — byte reader and PNG/TIFF writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Types
pub use core::params::ConversionParams;
pub use core::processing::normalize::GridStats;
pub use core::processing::pipeline::{OutputImage, PipelineTrace};
pub use error::{Error, Result};
pub use types::{CollisionPolicy, DegeneratePolicy, OUTPUT_CHANNELS, OUTPUT_SIZE, OutputFormat};

// High-level API re-exports
pub use api::batch::{
    BatchReport, CancelToken, FileOutcome, FileStatus, PlannedOutput, discover_inputs,
    plan_outputs, process_directory_to_path, process_paths,
};
pub use api::progress::{DEFAULT_PROGRESS_INTERVAL, ProgressMonitor};
pub use api::{convert, convert_bytes, convert_file, convert_to_named, output_base_name};
