//! TeX length units and the measurement type size arguments parse into.

/// A dimension with its unit, e.g. `1.5em`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub number: f64,
    pub unit: String,
}

/// TeX points per unit for the absolute units.
fn pt_per_unit(unit: &str) -> Option<f64> {
    match unit {
        // https://en.wikibooks.org/wiki/LaTeX/Lengths
        "pt" => Some(1.0),
        "mm" => Some(7227.0 / 2540.0),
        "cm" => Some(7227.0 / 254.0),
        "in" => Some(72.27),
        "bp" | "px" => Some(803.0 / 800.0),
        "pc" => Some(12.0),
        "dd" => Some(1238.0 / 1157.0),
        "cc" => Some(14856.0 / 1157.0),
        "nd" => Some(685.0 / 642.0),
        "nc" => Some(1370.0 / 107.0),
        "sp" => Some(1.0 / 65536.0),
        _ => None,
    }
}

/// Whether `unit` is a length unit this parser accepts.
#[must_use]
pub fn valid_unit_str(unit: &str) -> bool {
    pt_per_unit(unit).is_some() || matches!(unit, "ex" | "em" | "mu")
}

/// Whether a measurement carries a valid unit.
#[must_use]
pub fn valid_unit(measurement: &Measurement) -> bool {
    valid_unit_str(&measurement.unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_and_relative_units() {
        for unit in ["pt", "mm", "cm", "in", "bp", "pc", "dd", "cc", "nd", "nc", "sp", "px", "ex", "em", "mu"] {
            assert!(valid_unit_str(unit), "{unit} should be valid");
        }
    }

    #[test]
    fn test_invalid_units() {
        for unit in ["", "e", "am", "zz", "pts"] {
            assert!(!valid_unit_str(unit), "{unit} should be invalid");
        }
    }
}
