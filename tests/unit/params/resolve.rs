use super::*;

fn args(duration: i64) -> TimerArgs {
    TimerArgs::with_duration(duration)
}

#[test]
fn defaults_match_the_documented_table() {
    let p = args(5).resolve().unwrap();
    assert_eq!(p.duration(), 5);
    assert_eq!(p.warning(), None);
    assert_eq!(p.output_path(), Path::new("timer5.gif"));
    assert_eq!(p.canvas(), DEFAULT_CANVAS);
    assert_eq!(p.font_size(), 120);
    assert_eq!(p.dot_radius(), 8);
    assert_eq!(p.background(), Rgba8::new(255, 255, 255, 0));
    assert_eq!(p.palette(), Palette::default());
    assert_eq!(p.font(), &FontSource::Builtin);
}

#[test]
fn duration_bounds() {
    assert_eq!(
        TimerArgs::default().resolve(),
        Err(ParamError::MissingDuration)
    );
    assert_eq!(args(0).resolve(), Err(ParamError::DurationOutOfRange(0)));
    assert_eq!(
        args(1000).resolve(),
        Err(ParamError::DurationOutOfRange(1000))
    );
    assert_eq!(args(-3).resolve(), Err(ParamError::DurationOutOfRange(-3)));
    assert!(args(1).resolve().is_ok());
    assert!(args(999).resolve().is_ok());
}

#[test]
fn warning_bounds() {
    let with_warning = |d: i64, w: i64| TimerArgs {
        warning: Some(w),
        ..args(d)
    };

    assert_eq!(
        with_warning(30, 0).resolve(),
        Err(ParamError::WarningOutOfRange {
            warning: 0,
            duration: 30
        })
    );
    assert_eq!(
        with_warning(30, 30).resolve(),
        Err(ParamError::WarningOutOfRange {
            warning: 30,
            duration: 30
        })
    );
    assert_eq!(with_warning(30, 1).resolve().unwrap().warning(), Some(1));
    assert_eq!(with_warning(30, 29).resolve().unwrap().warning(), Some(29));

    // The legacy "-1 means none" sentinel is accepted.
    assert_eq!(with_warning(30, -1).resolve().unwrap().warning(), None);
    // A one-second timer has no valid warning value.
    assert!(with_warning(1, 1).resolve().is_err());
}

#[test]
fn size_parsing_and_bounds() {
    assert_eq!(
        SizeSpec::parse("(450,550)").unwrap(),
        SizeSpec {
            width: 450,
            height: 550
        }
    );
    assert_eq!(
        SizeSpec::parse(" 20 , 30 ").unwrap(),
        SizeSpec {
            width: 20,
            height: 30
        }
    );
    for bad in ["450", "1,2,3", "a,b", "(1,2", "1.5,2", ""] {
        assert!(
            matches!(SizeSpec::parse(bad), Err(ParamError::MalformedSize(_))),
            "expected '{bad}' to be rejected"
        );
    }

    let sized = |w: i64, h: i64| TimerArgs {
        size: Some(SizeSpec {
            width: w,
            height: h,
        }),
        ..args(5)
    };
    assert_eq!(
        sized(450, 550).resolve().unwrap().canvas(),
        Canvas {
            width: 450,
            height: 550
        }
    );
    assert!(matches!(
        sized(0, 10).resolve(),
        Err(ParamError::SizeOutOfRange { .. })
    ));
    assert!(matches!(
        sized(10, 70_000).resolve(),
        Err(ParamError::SizeOutOfRange { .. })
    ));
}

#[test]
fn font_size_and_dot_radius_must_be_positive() {
    let p = TimerArgs {
        font_size: Some(0),
        ..args(5)
    };
    assert_eq!(p.resolve(), Err(ParamError::FontSizeNotPositive(0)));

    let p = TimerArgs {
        dot_radius: Some(-2),
        ..args(5)
    };
    assert_eq!(p.resolve(), Err(ParamError::DotRadiusNotPositive(-2)));

    let p = TimerArgs {
        font_size: Some(150),
        dot_radius: Some(15),
        ..args(5)
    };
    let p = p.resolve().unwrap();
    assert_eq!((p.font_size(), p.dot_radius()), (150, 15));
}

#[test]
fn colors_resolve_per_field() {
    let p = TimerArgs {
        color: Some(ColorSpec::Text("white".into())),
        dot_color: Some(ColorSpec::Channels([0, 0, 255, 255])),
        ..args(5)
    };
    let p = p.resolve().unwrap();
    assert_eq!(p.background(), Rgba8::new(255, 255, 255, 255));
    assert_eq!(p.palette().normal, Rgba8::new(0, 0, 255, 255));
    assert_eq!(p.palette().warning, Rgba8::RED);

    let p = TimerArgs {
        warning_color: Some(ColorSpec::Channels([0, 0, 300, 255])),
        ..args(5)
    };
    assert!(matches!(
        p.resolve(),
        Err(ParamError::ChannelOutOfRange {
            field: "warning color",
            ..
        })
    ));
}

#[test]
fn merge_prefers_overrides() {
    let file = TimerArgs {
        duration: Some(10),
        warning: Some(3),
        font_size: Some(90),
        ..TimerArgs::default()
    };
    let flags = TimerArgs {
        duration: Some(20),
        ..TimerArgs::default()
    };
    let merged = file.merged_with(flags);
    assert_eq!(merged.duration, Some(20));
    assert_eq!(merged.warning, Some(3));
    assert_eq!(merged.font_size, Some(90));
}

#[test]
fn json_config_accepts_both_shapes_and_rejects_unknown_keys() {
    let a: TimerArgs = serde_json::from_str(
        r#"{"duration": 12, "size": [300, 200], "color": [0, 0, 0, 255], "warning_color": "orange"}"#,
    )
    .unwrap();
    let p = a.resolve().unwrap();
    assert_eq!(
        p.canvas(),
        Canvas {
            width: 300,
            height: 200
        }
    );
    assert_eq!(p.background(), Rgba8::BLACK);
    assert_eq!(p.palette().warning, Rgba8::new(255, 165, 0, 255));

    let a: TimerArgs = serde_json::from_str(r#"{"duration": 12, "size": "(64,32)"}"#).unwrap();
    assert_eq!(a.size, Some(SizeSpec { width: 64, height: 32 }));

    assert!(serde_json::from_str::<TimerArgs>(r#"{"duraton": 12}"#).is_err());
}

#[test]
fn config_file_errors_are_reported_as_config() {
    let missing = Path::new("target/does-not-exist/timer.json");
    assert!(matches!(
        TimerArgs::from_json_path(missing),
        Err(ParamError::Config(_))
    ));
}

#[test]
fn preview_tick_must_be_inside_the_countdown() {
    let p = args(5).resolve().unwrap();
    assert_eq!(p.check_tick(0), Ok(Tick(0)));
    assert_eq!(p.check_tick(5), Ok(Tick(5)));
    assert!(p.check_tick(6).is_err());
    assert!(p.check_tick(-1).is_err());
}
