use chrono::NaiveDateTime;

pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
const ASTRONOMICAL_UNIT_KM: f64 = 149_597_870.7;

/// Sun position in the TEME frame at `timestamp`, in km.
///
/// Low-precision mean-element model (Astronomical Almanac), good to a few
/// hundredths of a degree; ample for the shadow test below.
pub fn sun_position_teme_km(timestamp: &NaiveDateTime) -> [f64; 3] {
    let centuries = sgp4::julian_years_since_j2000(timestamp) / 100.0;

    let mean_longitude_deg = 280.460 + 36_000.771 * centuries;
    let mean_anomaly = (357.528 + 35_999.050 * centuries).to_radians();
    let ecliptic_longitude = (mean_longitude_deg
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin())
    .to_radians();
    let obliquity = (23.439 - 0.013 * centuries).to_radians();
    let distance_km = (1.00014
        - 0.01671 * mean_anomaly.cos()
        - 0.00014 * (2.0 * mean_anomaly).cos())
        * ASTRONOMICAL_UNIT_KM;

    [
        distance_km * ecliptic_longitude.cos(),
        distance_km * obliquity.cos() * ecliptic_longitude.sin(),
        distance_km * obliquity.sin() * ecliptic_longitude.sin(),
    ]
}

/// Whether a satellite at `sat_teme_km` is in direct sunlight.
///
/// Cylindrical shadow model: the satellite is eclipsed iff it sits on the
/// anti-sun side of Earth within one equatorial radius of the shadow axis.
pub fn is_sunlit(sat_teme_km: [f64; 3], sun_teme_km: [f64; 3]) -> bool {
    let sun_distance = (sun_teme_km[0] * sun_teme_km[0]
        + sun_teme_km[1] * sun_teme_km[1]
        + sun_teme_km[2] * sun_teme_km[2])
        .sqrt();
    if sun_distance == 0.0 {
        return true;
    }

    let along_sun = (sat_teme_km[0] * sun_teme_km[0]
        + sat_teme_km[1] * sun_teme_km[1]
        + sat_teme_km[2] * sun_teme_km[2])
        / sun_distance;
    if along_sun >= 0.0 {
        return true;
    }

    let sat_distance_sq = sat_teme_km[0] * sat_teme_km[0]
        + sat_teme_km[1] * sat_teme_km[1]
        + sat_teme_km[2] * sat_teme_km[2];
    let axis_distance_sq = sat_distance_sq - along_sun * along_sun;
    axis_distance_sq > EARTH_EQUATORIAL_RADIUS_KM * EARTH_EQUATORIAL_RADIUS_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn sun_distance_is_about_one_au() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let sun = sun_position_teme_km(&timestamp);
        let distance = (sun[0] * sun[0] + sun[1] * sun[1] + sun[2] * sun[2]).sqrt();
        assert!(distance > 0.98 * ASTRONOMICAL_UNIT_KM);
        assert!(distance < 1.02 * ASTRONOMICAL_UNIT_KM);
    }

    #[test]
    fn sun_is_south_of_the_equator_at_j2000() {
        // J2000 epoch falls in northern winter: negative declination.
        let timestamp = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let sun = sun_position_teme_km(&timestamp);
        assert!(sun[2] < 0.0);
    }

    #[test]
    fn shadow_test_geometry() {
        let sun = [ASTRONOMICAL_UNIT_KM, 0.0, 0.0];

        // Sun side of Earth.
        assert!(is_sunlit([7000.0, 0.0, 0.0], sun));
        // Anti-sun side, on the shadow axis.
        assert!(!is_sunlit([-7000.0, 0.0, 0.0], sun));
        // Anti-sun side, but clear of the shadow cylinder.
        assert!(is_sunlit([-7000.0, 7000.0, 0.0], sun));
        // Just inside the cylinder wall.
        assert!(!is_sunlit([-7000.0, 6000.0, 0.0], sun));
    }
}
