use rand::Rng;
use std::fmt;

/// Lower bound of generated readings, degrees Celsius.
pub const MIN_CELSIUS: f64 = -10.0;

/// Upper bound of generated readings, degrees Celsius.
pub const MAX_CELSIUS: f64 = 40.0;

/// A single temperature reading. Generated readings are uniformly random in
/// [[`MIN_CELSIUS`], [`MAX_CELSIUS`]] and rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading(f64);

impl Reading {
    pub fn random() -> Self {
        let raw = rand::thread_rng().gen_range(MIN_CELSIUS..=MAX_CELSIUS);
        Reading((raw * 100.0).round() / 100.0)
    }

    pub fn celsius(&self) -> f64 {
        self.0
    }
}

// The Display form is the wire payload.
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_readings_stay_in_range() {
        for _ in 0..10_000 {
            let reading = Reading::random();
            assert!(reading.celsius() >= MIN_CELSIUS, "{reading} below range");
            assert!(reading.celsius() <= MAX_CELSIUS, "{reading} above range");
        }
    }

    #[test]
    fn random_readings_are_rounded_to_two_decimals() {
        for _ in 0..10_000 {
            let scaled = Reading::random().celsius() * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn display_is_the_plain_decimal_form() {
        assert_eq!(Reading(21.5).to_string(), "21.5");
        assert_eq!(Reading(-3.78).to_string(), "-3.78");
        assert_eq!(Reading(40.0).to_string(), "40");
    }
}
