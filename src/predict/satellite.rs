use std::fs;
use std::path::Path;

use sgp4::{Constants, Elements};

use super::error::PredictError;

/// A satellite loaded from a two- or three-line element set.
pub struct Satellite {
    pub name: String,
    pub elements: Elements,
    pub constants: Constants,
}

impl Satellite {
    pub fn from_tle_file(path: &Path) -> Result<Self, PredictError> {
        let content = fs::read_to_string(path)?;
        Self::from_tle(&content)
    }

    pub fn from_tle(tle: &str) -> Result<Self, PredictError> {
        let (name, line1, line2) = split_tle_lines(tle)?;
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())
            .map_err(|e| PredictError::InvalidTle(e.to_string()))?;
        let constants = Constants::from_elements(&elements)
            .map_err(|e| PredictError::InvalidTle(e.to_string()))?;
        let name = elements
            .object_name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));
        Ok(Satellite {
            name,
            elements,
            constants,
        })
    }
}

fn split_tle_lines(tle: &str) -> Result<(Option<String>, String, String), PredictError> {
    let lines: Vec<String> = tle
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    match lines.len() {
        2 => Ok((None, lines[0].clone(), lines[1].clone())),
        3 => Ok((Some(lines[0].clone()), lines[1].clone(), lines[2].clone())),
        _ => Err(PredictError::InvalidTleFormat),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const ISS_TLE: &str = "ISS (ZARYA)
1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn loads_a_named_three_line_set() {
        let satellite = Satellite::from_tle(ISS_TLE).unwrap();
        assert_eq!(satellite.name, "ISS (ZARYA)");
        assert_eq!(satellite.elements.norad_id, 25544);
    }

    #[test]
    fn loads_an_unnamed_two_line_set() {
        let unnamed: String = ISS_TLE.lines().skip(1).collect::<Vec<_>>().join("\n");
        let satellite = Satellite::from_tle(&unnamed).unwrap();
        assert_eq!(satellite.name, "NORAD 25544");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            Satellite::from_tle("just one line"),
            Err(PredictError::InvalidTleFormat)
        ));
        let garbage = "SAT\n1 garbage\n2 garbage";
        assert!(matches!(
            Satellite::from_tle(garbage),
            Err(PredictError::InvalidTle(_))
        ));
    }
}
