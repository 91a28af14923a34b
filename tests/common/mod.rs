use std::io::Write;

use approx::assert_relative_eq;
use rvcurve::orbital_elements::OrbitalElements;
use tempfile::NamedTempFile;

pub fn assert_elements_close(actual: &OrbitalElements, expected: &OrbitalElements, epsilon: f64) {
    assert_relative_eq!(
        actual.semi_amplitude,
        expected.semi_amplitude,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.period, expected.period, epsilon = epsilon);
    assert_relative_eq!(
        actual.eccentricity,
        expected.eccentricity,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.tau, expected.tau, epsilon = epsilon);
    assert_relative_eq!(actual.gamma, expected.gamma, epsilon = epsilon);
    assert_relative_eq!(actual.omega, expected.omega, epsilon = epsilon);
}

/// Parameter file of HD 4747 B (brown-dwarf companion).
pub const HD4747_PARAMS: &str = "# HD 4747 orbit\n\
name = HD 4747\n\
K1 = 0.7554\n\
period = 12115.7\n\
eccentricity = 0.7334\n\
tau = 2450403.1\n\
omega = 264.5\n\
mean_val = 0.0\n\
m_star = 0.82\n\
m_true = 63.1\n";

pub fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
