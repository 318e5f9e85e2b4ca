use disparate::{
    avec::sampler::TimingError,
    settings::{MAX_BIT_RATE, Settings, SettingsError},
};

#[test]
fn defaults() {
    let settings = Settings::default();
    assert_eq!(settings.input_channel, None);
    assert_eq!(settings.bit_rate, 9600);
    assert!(!settings.drop_idle_frames);
    assert_eq!(settings.validate(), Err(SettingsError::UndefinedChannel));
}

#[test]
fn bit_rate_range() {
    let mut settings = Settings {
        input_channel: Some(3),
        ..Settings::default()
    };
    assert_eq!(settings.validate(), Ok(()));

    settings.bit_rate = 0;
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BitRateOutOfRange(0))
    );

    settings.bit_rate = MAX_BIT_RATE + 1;
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BitRateOutOfRange(MAX_BIT_RATE + 1))
    );
}

#[test]
fn minimum_sample_rate() {
    let settings = Settings {
        input_channel: Some(0),
        bit_rate: MAX_BIT_RATE,
        drop_idle_frames: false,
    };
    assert_eq!(settings.minimum_sample_rate(), 40_000_000);

    assert_eq!(
        settings.timing(39_999_999),
        Err(SettingsError::Timing(TimingError::SampleRateTooLow {
            sample_rate: 39_999_999,
            minimum: 40_000_000
        }))
    );

    let timing = settings.timing(40_000_000).unwrap();
    assert_eq!(timing.samples_per_bit(), 4);
    assert_eq!(timing.samples_to_center(), 6);
}

#[test]
fn persistence() {
    let settings = Settings {
        input_channel: Some(2),
        bit_rate: 1_250_000,
        drop_idle_frames: true,
    };
    assert_eq!(settings.to_string(), "2 1250000 true");
    assert_eq!("2 1250000 true".parse::<Settings>(), Ok(settings));

    let settings = Settings::default();
    assert_eq!(settings.to_string(), "- 9600 false");
    assert_eq!("-  9600\tfalse\n".parse::<Settings>(), Ok(settings));
}

#[test]
fn malformed() {
    assert_eq!(
        "".parse::<Settings>(),
        Err(SettingsError::Missing("channel"))
    );
    assert_eq!(
        "0 9600".parse::<Settings>(),
        Err(SettingsError::Missing("drop idle frames"))
    );
    assert_eq!(
        "x 9600 false".parse::<Settings>(),
        Err(SettingsError::Malformed("channel"))
    );
    assert_eq!(
        "0 fast false".parse::<Settings>(),
        Err(SettingsError::Malformed("bit rate"))
    );
    assert_eq!(
        "0 9600 yes".parse::<Settings>(),
        Err(SettingsError::Malformed("drop idle frames"))
    );
    assert_eq!(
        "0 0 false".parse::<Settings>(),
        Err(SettingsError::BitRateOutOfRange(0))
    );
}

#[test]
fn messages() {
    assert_eq!(
        SettingsError::UndefinedChannel.to_string(),
        "No input channel selected."
    );
    assert_eq!(
        SettingsError::Timing(TimingError::ZeroBitRate).to_string(),
        "Unusable sample rate: Bit rate must be non-zero."
    );
}
