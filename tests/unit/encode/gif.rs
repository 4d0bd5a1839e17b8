use super::*;

fn rejected() -> ::gif::EncodingError {
    ::gif::EncodingError::Format(::gif::EncodingFormatError::MissingColorPalette)
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target/unit_gif").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn fallback_is_not_used_when_preferred_disposal_succeeds() {
    let mut seen = Vec::new();
    let (v, fell_back) = encode_with_fallback(Disposal::Background, |d| {
        seen.push(d);
        Ok::<_, ::gif::EncodingError>(7)
    })
    .unwrap();
    assert_eq!((v, fell_back), (7, false));
    assert_eq!(seen, vec![Disposal::Background]);
}

#[test]
fn format_rejection_retries_once_without_disposal() {
    let mut seen = Vec::new();
    let (v, fell_back) = encode_with_fallback(Disposal::Background, |d| {
        seen.push(d);
        match d {
            Disposal::Background => Err(rejected()),
            Disposal::Unspecified => Ok("encoded"),
        }
    })
    .unwrap();
    assert_eq!((v, fell_back), ("encoded", true));
    assert_eq!(seen, vec![Disposal::Background, Disposal::Unspecified]);
}

#[test]
fn second_rejection_and_io_errors_are_fatal() {
    let mut calls = 0;
    let err = encode_with_fallback(Disposal::Background, |_| {
        calls += 1;
        Err::<(), _>(rejected())
    })
    .unwrap_err();
    assert_eq!(calls, 2);
    assert!(err.to_string().contains("encode error:"));

    let mut calls = 0;
    let err = encode_with_fallback(Disposal::Background, |_| {
        calls += 1;
        Err::<(), _>(::gif::EncodingError::from(std::io::Error::other("disk full")))
    })
    .unwrap_err();
    assert_eq!(calls, 1);
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn atomic_write_replaces_target_and_leaves_no_partial() {
    let dir = scratch_dir("atomic");
    let out = dir.join("nested/t.gif");
    write_atomically(&out, b"first").unwrap();
    write_atomically(&out, b"second").unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"second");
    assert!(!dir.join("nested/t.gif.partial").exists());
}

#[test]
fn failed_rename_cleans_up_partial_file() {
    let dir = scratch_dir("rename_fail");
    // A non-empty directory at the target path makes the rename fail.
    let out = dir.join("occupied.gif");
    std::fs::create_dir_all(out.join("child")).unwrap();
    assert!(write_atomically(&out, b"bytes").is_err());
    assert!(!dir.join("occupied.gif.partial").exists());
}

fn solid_frame(tick: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        tick: Tick(tick),
        width: 4,
        height: 4,
        data: rgba.repeat(16),
    }
}

#[test]
fn sink_writes_looping_gif_with_background_disposal() {
    let dir = scratch_dir("sink");
    let out = dir.join("two.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        frames_total: 2,
    })
    .unwrap();
    sink.push_frame(Tick(1), &solid_frame(1, [255, 0, 0, 255])).unwrap();
    sink.push_frame(Tick(0), &solid_frame(0, [0, 0, 0, 0])).unwrap();
    sink.end().unwrap();

    assert!(!sink.disposal_fallback());
    assert_eq!(sink.bytes_written(), std::fs::metadata(&out).unwrap().len());

    let mut opts = ::gif::DecodeOptions::new();
    opts.set_color_output(::gif::ColorOutput::RGBA);
    let mut decoder = opts
        .read_info(std::io::BufReader::new(std::fs::File::open(&out).unwrap()))
        .unwrap();
    assert_eq!(decoder.repeat(), ::gif::Repeat::Infinite);

    let first = decoder.read_next_frame().unwrap().unwrap().clone();
    assert_eq!(first.delay, 100);
    assert_eq!(first.dispose, ::gif::DisposalMethod::Background);
    assert_eq!(&first.buffer[..4], &[255, 0, 0, 255]);

    let last = decoder.read_next_frame().unwrap().unwrap().clone();
    assert_eq!(last.dispose, ::gif::DisposalMethod::Background);
    assert_eq!(last.buffer[3], 0);
    assert!(decoder.read_next_frame().unwrap().is_none());
}

#[test]
fn incomplete_countdown_writes_nothing() {
    let dir = scratch_dir("incomplete");
    let out = dir.join("never.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        frames_total: 3,
    })
    .unwrap();
    sink.push_frame(Tick(2), &solid_frame(2, [0, 0, 0, 255])).unwrap();
    assert!(sink.end().is_err());
    assert!(!out.exists());
}

#[test]
fn invalid_options_are_rejected_at_begin() {
    let cfg = SinkConfig {
        width: 4,
        height: 4,
        frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        frames_total: 1,
    };
    let mut sink = GifSink::new(GifSinkOpts::default().with_quantize_speed(0));
    assert!(sink.begin(cfg).is_err());

    let mut sink = GifSink::new(GifSinkOpts::default());
    assert!(sink.begin(SinkConfig { width: 0, ..cfg }).is_err());
    assert!(
        sink.begin(SinkConfig {
            frame_delay_ms: 10_000_000,
            ..cfg
        })
        .is_err()
    );
}
