//! Unit tests for the EMA series

use trendcast::indicators::trend::ema_series;
use trendcast::indicators::IndicatorError;

#[test]
fn test_zero_period_rejected() {
    let values = vec![1.0, 2.0, 3.0];
    assert_eq!(
        ema_series(&values, 0),
        Err(IndicatorError::InvalidPeriod(0))
    );
}

#[test]
fn test_short_input_is_all_undefined() {
    let values = vec![1.0, 2.0, 3.0];
    let out = ema_series(&values, 5).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(Option::is_none));
}

#[test]
fn test_output_length_matches_input_length() {
    for len in 0..30 {
        let values: Vec<f64> = (0..len).map(|i| 100.0 + i as f64).collect();
        let out = ema_series(&values, 10).unwrap();
        assert_eq!(out.len(), values.len());
    }
}

#[test]
fn test_seed_is_mean_of_first_period_values() {
    let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let out = ema_series(&values, 5).unwrap();
    assert!(out[..4].iter().all(Option::is_none));
    assert_eq!(out[4], Some(3.0));
}

#[test]
fn test_recurrence_after_seed() {
    let values = vec![10.0, 11.5, 9.8, 12.2, 13.0, 12.4, 14.1, 13.7, 15.0, 14.2];
    let period = 4;
    let out = ema_series(&values, period).unwrap();

    let k = 2.0 / (period as f64 + 1.0);
    for i in period..values.len() {
        let prev = out[i - 1].unwrap();
        let expected = values[i] * k + prev * (1.0 - k);
        let got = out[i].unwrap();
        assert!(
            (got - expected).abs() < 1e-12,
            "index {i}: got {got}, expected {expected}"
        );
    }
}

#[test]
fn test_constant_series_stays_constant() {
    let values = vec![50.0; 20];
    let out = ema_series(&values, 5).unwrap();
    for v in out.into_iter().flatten() {
        assert!((v - 50.0).abs() < 1e-12);
    }
}

#[test]
fn test_period_one_tracks_input() {
    let values = vec![3.0, 7.0, 5.0];
    let out = ema_series(&values, 1).unwrap();
    assert_eq!(out, vec![Some(3.0), Some(7.0), Some(5.0)]);
}
