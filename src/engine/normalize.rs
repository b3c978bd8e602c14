//! Reading normalization: fill in whatever the sensor did not report.

use crate::models::{RawReading, Reading, DEFAULT_PH, DEFAULT_TDS, DEFAULT_TEMPERATURE};

impl RawReading {
    /// Produce a canonical [`Reading`], defaulting each absent field on its own.
    ///
    /// Present values are passed through untouched, including zero and
    /// out-of-range figures; classification downstream decides what they mean.
    pub fn normalize(&self) -> Reading {
        // ---
        Reading {
            ph: self.ph.unwrap_or(DEFAULT_PH),
            tds: self.tds.unwrap_or(DEFAULT_TDS),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_empty_reading_gets_defaults() {
        // ---
        let reading = RawReading::default().normalize();

        assert_eq!(reading.ph, 7.0);
        assert_eq!(reading.tds, 200.0);
        assert_eq!(reading.temperature, 25.0);
    }

    #[test]
    fn test_fields_default_independently() {
        // ---
        let raw = RawReading {
            ph: Some(6.1),
            tds: None,
            temperature: Some(18.4),
        };
        let reading = raw.normalize();

        assert_eq!(reading.ph, 6.1);
        assert_eq!(reading.tds, 200.0);
        assert_eq!(reading.temperature, 18.4);
    }

    #[test]
    fn test_present_zero_is_kept() {
        // ---
        let raw = RawReading {
            ph: Some(0.0),
            tds: Some(0.0),
            temperature: Some(0.0),
        };
        let reading = raw.normalize();

        assert_eq!(reading.ph, 0.0);
        assert_eq!(reading.tds, 0.0);
        assert_eq!(reading.temperature, 0.0);
    }
}
