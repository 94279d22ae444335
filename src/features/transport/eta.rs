use crate::core::error::{AppError, Result};
use crate::features::transport::models::TransportMode;

/// Minutes added per intermediate stop
const STOP_PENALTY_MINUTES: f64 = 1.5;

/// Average cruising speed per mode in km/h
fn mode_speed_kmh(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Bus => 20.0,
        TransportMode::Train => 45.0,
        TransportMode::Tram => 25.0,
        TransportMode::Ferry => 15.0,
    }
}

/// Estimate travel minutes over `distance_km` with `stops` intermediate
/// stops. Linear in distance, each stop adds a fixed penalty.
pub fn estimate_minutes(mode: TransportMode, distance_km: f64, stops: u32) -> Result<f64> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(AppError::Validation(
            "Distance must be a positive number of kilometers".to_string(),
        ));
    }

    let travel = distance_km / mode_speed_kmh(mode) * 60.0;
    Ok(travel + f64::from(stops) * STOP_PENALTY_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn bus_eta_over_twenty_km_with_no_stops_is_one_hour() {
        assert_close(
            estimate_minutes(TransportMode::Bus, 20.0, 0).unwrap(),
            60.0,
        );
    }

    #[test]
    fn eta_is_linear_in_distance() {
        let one = estimate_minutes(TransportMode::Train, 9.0, 0).unwrap();
        let two = estimate_minutes(TransportMode::Train, 18.0, 0).unwrap();
        assert_close(two, one * 2.0);
    }

    #[test]
    fn each_stop_adds_a_fixed_penalty() {
        let base = estimate_minutes(TransportMode::Tram, 5.0, 0).unwrap();
        let with_stops = estimate_minutes(TransportMode::Tram, 5.0, 4).unwrap();
        assert_close(with_stops - base, 4.0 * STOP_PENALTY_MINUTES);
    }

    #[test]
    fn slower_modes_take_longer_over_the_same_distance() {
        let ferry = estimate_minutes(TransportMode::Ferry, 10.0, 0).unwrap();
        let train = estimate_minutes(TransportMode::Train, 10.0, 0).unwrap();
        assert!(ferry > train);
    }

    #[test]
    fn non_positive_distance_is_rejected() {
        assert!(estimate_minutes(TransportMode::Bus, 0.0, 0).is_err());
        assert!(estimate_minutes(TransportMode::Bus, -3.0, 0).is_err());
        assert!(estimate_minutes(TransportMode::Bus, f64::NAN, 0).is_err());
    }

    #[test]
    fn zero_stops_is_allowed() {
        assert!(estimate_minutes(TransportMode::Ferry, 1.0, 0).is_ok());
    }
}
