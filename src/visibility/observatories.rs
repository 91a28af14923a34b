use itertools::Itertools;

use crate::{constants::Degree, rv_errors::RvError};

/// Geodetic position of an observing site.
///
/// Longitudes are counted positive towards the east.
#[derive(Debug, Clone, PartialEq)]
pub struct Observatory {
    pub code: &'static str,
    pub name: &'static str,
    pub longitude: Degree,
    pub latitude: Degree,
    pub altitude: f64,
}

static OBSERVATORIES: [Observatory; 8] = [
    Observatory {
        code: "esolasilla",
        name: "European Southern Observatory, La Silla",
        longitude: -70.73,
        latitude: -29.2567,
        altitude: 2347.0,
    },
    Observatory {
        code: "esoparanal",
        name: "European Southern Observatory, Paranal",
        longitude: -70.4025,
        latitude: -24.625,
        altitude: 2635.0,
    },
    Observatory {
        code: "lapalma",
        name: "Roque de los Muchachos, La Palma",
        longitude: -17.88,
        latitude: 28.758333,
        altitude: 2327.0,
    },
    Observatory {
        code: "keck",
        name: "W. M. Keck Observatory",
        longitude: -155.478333,
        latitude: 19.828333,
        altitude: 4160.0,
    },
    Observatory {
        code: "lco",
        name: "Las Campanas Observatory",
        longitude: -70.701667,
        latitude: -29.003333,
        altitude: 2282.0,
    },
    Observatory {
        code: "palomar",
        name: "Palomar Observatory",
        longitude: -116.863,
        latitude: 33.356,
        altitude: 1706.0,
    },
    Observatory {
        code: "mcdonald",
        name: "McDonald Observatory",
        longitude: -104.0217,
        latitude: 30.6717,
        altitude: 2075.0,
    },
    Observatory {
        code: "saao",
        name: "South African Astronomical Observatory",
        longitude: 20.8108,
        latitude: -32.3794,
        altitude: 1798.0,
    },
];

impl Observatory {
    /// Look up a site by code, ignoring case.
    ///
    /// Errors
    /// ------
    /// * [`RvError::UnknownObservatory`], listing every valid code.
    pub fn from_code(code: &str) -> Result<&'static Observatory, RvError> {
        let wanted = code.trim().to_lowercase();
        OBSERVATORIES
            .iter()
            .find(|obs| obs.code == wanted)
            .ok_or_else(|| RvError::UnknownObservatory {
                code: code.to_string(),
                valid: valid_codes().join(", "),
            })
    }
}

/// Codes accepted by [`Observatory::from_code`], sorted.
pub fn valid_codes() -> Vec<&'static str> {
    OBSERVATORIES.iter().map(|obs| obs.code).sorted().collect()
}

#[cfg(test)]
mod observatories_test {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let obs = Observatory::from_code("Palomar").unwrap();
        assert_eq!(obs.code, "palomar");
        assert_eq!(obs.altitude, 1706.0);
    }

    #[test]
    fn test_unknown_code_lists_valid_ones() {
        let err = Observatory::from_code("atlantis").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("atlantis"));
        for code in valid_codes() {
            assert!(message.contains(code), "{code} missing from '{message}'");
        }
    }

    #[test]
    fn test_valid_codes_sorted() {
        let codes = valid_codes();
        assert_eq!(codes.len(), 8);
        assert_eq!(codes[0], "esolasilla");
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
    }
}
