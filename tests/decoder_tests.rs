//! Integration tests for InputDecoder

mod common;
use common::*;

use keypad_sequencer::{
    Band, ConfigError, DecoderConfig, InputDecoder, KeyBand, KeySignal, measure_millivolts,
};

fn decoder() -> InputDecoder {
    InputDecoder::new(DecoderConfig::default()).unwrap()
}

/// Polls `ticks` times at a fixed voltage and collects the emitted signals.
fn poll_at(
    decoder: &mut InputDecoder,
    adc: &mut MockAdc,
    millivolts: u32,
    ticks: u32,
) -> Vec<KeySignal> {
    adc.set_millivolts(millivolts);
    (0..ticks)
        .map(|_| decoder.poll(&mut *adc))
        .filter(|signal| signal.is_key())
        .collect()
}

#[test]
fn steady_press_emits_exactly_one_signal() {
    let mut decoder = decoder();
    let mut adc = MockAdc::new();

    for (millivolts, key) in [
        (LEFT_MV, KeySignal::Left),
        (UP_MV, KeySignal::Up),
        (RIGHT_MV, KeySignal::Right),
        (DOWN_MV, KeySignal::Down),
    ] {
        let signals = poll_at(&mut decoder, &mut adc, millivolts, 5);
        assert_eq!(signals, vec![key]);
        assert!(poll_at(&mut decoder, &mut adc, IDLE_MV, 5).is_empty());
        assert_eq!(decoder.held(), KeySignal::None);
    }
}

#[test]
fn holding_a_key_never_refires() {
    let mut decoder = decoder();
    let mut adc = MockAdc::new();

    let signals = poll_at(&mut decoder, &mut adc, UP_MV, 500);
    assert_eq!(signals, vec![KeySignal::Up]);
    assert_eq!(decoder.held(), KeySignal::Up);
}

#[test]
fn noise_inside_hold_band_does_not_retrigger() {
    let mut decoder = decoder();
    let mut adc = MockAdc::new();

    let mut signals = poll_at(&mut decoder, &mut adc, DOWN_MV, 5);
    // Jitter around Down's press band edges, still inside its hold band.
    for millivolts in [2150, 750, 2190, 1000, 720] {
        signals.extend(poll_at(&mut decoder, &mut adc, millivolts, 5));
    }

    assert_eq!(signals, vec![KeySignal::Down]);
    assert_eq!(decoder.held(), KeySignal::Down);
}

#[test]
fn release_then_press_emits_second_signal() {
    let mut decoder = decoder();
    let mut adc = MockAdc::new();

    let mut signals = poll_at(&mut decoder, &mut adc, LEFT_MV, 5);
    signals.extend(poll_at(&mut decoder, &mut adc, IDLE_MV, 5));
    signals.extend(poll_at(&mut decoder, &mut adc, LEFT_MV, 5));

    assert_eq!(signals, vec![KeySignal::Left, KeySignal::Left]);
}

#[test]
fn classification_is_rate_limited_to_settle_period() {
    let mut decoder = decoder();
    let mut adc = MockAdc::new();

    poll_at(&mut decoder, &mut adc, IDLE_MV, 10);
    // 16 samples per classification, 2 classifications in 10 ticks.
    assert_eq!(adc.reads, 32);
}

#[test]
fn press_shorter_than_settle_period_can_be_missed() {
    let mut decoder = decoder();
    let mut adc = MockAdc::new();

    // First tick classifies the idle reading.
    poll_at(&mut decoder, &mut adc, IDLE_MV, 1);
    let signals = poll_at(&mut decoder, &mut adc, UP_MV, 3);
    assert!(signals.is_empty());

    let signals = poll_at(&mut decoder, &mut adc, IDLE_MV, 5);
    assert!(signals.is_empty());
}

#[test]
fn out_of_band_readings_stay_released() {
    let mut decoder = decoder();
    for millivolts in [235, 800, 2100, 3300, 5000] {
        assert_eq!(decoder.classify(millivolts), KeySignal::None);
    }
    assert_eq!(decoder.held(), KeySignal::None);
    assert_eq!(decoder.last_millivolts(), Some(5000));
}

#[test]
fn measurement_matches_scripted_voltage() {
    let config = DecoderConfig::default();
    let mut adc = MockAdc::new();
    for millivolts in [0, 234, 236, 1500, 2500, 3300] {
        adc.set_millivolts(millivolts);
        assert_eq!(measure_millivolts(&mut adc, &config), millivolts);
    }
}

#[test]
fn custom_settle_period_is_respected() {
    let config = DecoderConfig::default().with_settle_ticks(2);
    let mut decoder = InputDecoder::new(config).unwrap();
    let mut adc = MockAdc::new();
    assert_eq!(decoder.config().settle_ticks, 2);

    assert_eq!(poll_at(&mut decoder, &mut adc, RIGHT_MV, 2), vec![KeySignal::Right]);
    assert!(poll_at(&mut decoder, &mut adc, IDLE_MV, 2).is_empty());
    assert_eq!(poll_at(&mut decoder, &mut adc, RIGHT_MV, 2), vec![KeySignal::Right]);
}

#[test]
fn invalid_configuration_is_rejected() {
    let result = InputDecoder::new(DecoderConfig::default().with_samples(0));
    assert!(matches!(result, Err(ConfigError::ZeroSamples)));

    let mut bands = DecoderConfig::default().bands;
    bands[0] = KeyBand::new(KeySignal::None, Band::new(2101, 3299), Band::new(2000, 3299));
    let result = InputDecoder::new(DecoderConfig::default().with_bands(bands));
    assert!(matches!(result, Err(ConfigError::UnassignedBand)));
}

#[test]
fn second_band_for_same_key_is_rejected() {
    // A second Left band over Up's range would release on every other sample.
    let mut bands = DecoderConfig::default().bands;
    bands[3] = KeyBand::new(KeySignal::Left, Band::new(236, 799), Band::new(135, 900));
    let result = InputDecoder::new(DecoderConfig::default().with_bands(bands));
    assert!(matches!(result, Err(ConfigError::DuplicateKey(KeySignal::Left))));
}

#[test]
fn config_errors_format_for_display() {
    let message = format!("{}", ConfigError::OverlappingPress(KeySignal::Up, KeySignal::Right));
    assert_eq!(message, "press bands for Up and Right overlap");

    let message = format!("{}", ConfigError::DuplicateKey(KeySignal::Left));
    assert_eq!(message, "Left is named by more than one band");
}
