use std::{str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{
    constants::Degree,
    conversion::{dec_to_dms, ra_to_hms},
    rv_errors::RvError,
};

static TARGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^:]+):(?P<ra>[-+]?\d+(?:\.\d*)?):(?P<dec>[-+]?\d+(?:\.\d*)?)$")
        .expect("valid target regex")
});

/// A named position on the sky (equatorial, degrees).
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub ra: Degree,
    pub dec: Degree,
}

impl Target {
    pub fn new(name: impl Into<String>, ra: Degree, dec: Degree) -> Self {
        Target {
            name: name.into(),
            ra,
            dec,
        }
    }

    /// `name hh mm ss.sss ±dd mm ss.sss`, the coordinate format read by STARALT.
    pub fn staralt_line(&self) -> String {
        format!("{} {} {}", self.name, ra_to_hms(self.ra), dec_to_dms(self.dec))
    }
}

/// Parse `NAME:RA:DEC`, both angles in decimal degrees.
impl FromStr for Target {
    type Err = RvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RvError::InvalidTarget(s.to_string());

        let caps = TARGET_RE.captures(s.trim()).ok_or_else(invalid)?;
        let ra: f64 = caps["ra"].parse().map_err(|_| invalid())?;
        let dec: f64 = caps["dec"].parse().map_err(|_| invalid())?;

        if !(0.0..360.0).contains(&ra) || !(-90.0..=90.0).contains(&dec) {
            return Err(invalid());
        }

        Ok(Target::new(caps["name"].trim(), ra, dec))
    }
}

/// Parse command-line targets; each argument may hold several targets separated by commas.
pub fn parse_targets<S: AsRef<str>>(args: &[S]) -> Result<Vec<Target>, RvError> {
    args.iter()
        .flat_map(|a| a.as_ref().split(',').map(str::to_string).collect::<Vec<_>>())
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.parse::<Target>())
        .collect()
}

#[cfg(test)]
mod targets_test {
    use super::*;

    #[test]
    fn test_parse_target() {
        let target: Target = "HD20010:49.982:-28.857".parse().unwrap();
        assert_eq!(target, Target::new("HD20010", 49.982, -28.857));
    }

    #[test]
    fn test_parse_target_with_space_in_name() {
        let target: Target = "HD 41248:90:-56.3".parse().unwrap();
        assert_eq!(target.name, "HD 41248");
        assert_eq!(target.ra, 90.0);
    }

    #[test]
    fn test_staralt_line() {
        let target = Target::new("HD20010", 49.982, -28.857);
        assert_eq!(target.staralt_line(), "HD20010 03 19 55.680 -28 51 25.200");
    }

    #[test]
    fn test_invalid_targets() {
        for bad in ["HD20010", "HD20010:49.9", "X:400:10", "X:10:-95", ":10:10"] {
            assert_eq!(
                bad.parse::<Target>(),
                Err(RvError::InvalidTarget(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_parse_targets_comma_separated() {
        let targets = parse_targets(&["A:1:2,B:3:4", "C:5:-6"]).unwrap();
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
