use chrono::{DateTime, Utc};

use crate::visibility::Observation;

use super::error::PropagationError;
use super::observer::Observer;
use super::satellite::Satellite;
use super::series::ObservationSource;
use super::sun::{is_sunlit, sun_position_teme_km};

/// SGP4-backed observation source for one satellite/observer pair.
pub struct Sgp4Propagator<'a> {
    satellite: &'a Satellite,
    observer: Observer,
}

impl<'a> Sgp4Propagator<'a> {
    pub fn new(satellite: &'a Satellite, observer: Observer) -> Self {
        Self {
            satellite,
            observer,
        }
    }
}

impl ObservationSource for Sgp4Propagator<'_> {
    fn observe(&self, instant: DateTime<Utc>) -> Result<Observation, PropagationError> {
        observe_at(self.satellite, &self.observer, instant)
    }
}

/// Propagate one observation: topocentric elevation, azimuth and range,
/// plus the sunlit flag.
pub fn observe_at(
    satellite: &Satellite,
    observer: &Observer,
    timestamp: DateTime<Utc>,
) -> Result<Observation, PropagationError> {
    let minutes = satellite
        .elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PropagationError(e.to_string()))?;

    let prediction = satellite
        .constants
        .propagate(minutes)
        .map_err(|e| PropagationError(e.to_string()))?;

    let sidereal =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()));

    let sat_ecef = teme_to_ecef_position(prediction.position, sidereal);
    let obs_ecef = observer.position_ecef_km();

    let dr = [
        sat_ecef[0] - obs_ecef[0],
        sat_ecef[1] - obs_ecef[1],
        sat_ecef[2] - obs_ecef[2],
    ];
    let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

    let enu = ecef_to_enu(dr, observer.lat_rad(), observer.lon_rad());
    let azimuth = enu.0.atan2(enu.1).to_degrees().rem_euclid(360.0);
    let elevation = if range_km > 0.0 {
        (enu.2 / range_km).asin().to_degrees()
    } else {
        0.0
    };

    let sun_teme = sun_position_teme_km(&timestamp.naive_utc());
    let sunlit = is_sunlit(prediction.position, sun_teme);

    Ok(Observation {
        elevation_deg: round2(elevation),
        azimuth_deg: round2(azimuth),
        range_km: round2(range_km),
        sunlit,
    })
}

fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
