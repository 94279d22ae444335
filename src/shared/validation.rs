use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for transport route codes.
    /// Uppercase alphanumeric groups joined by hyphens
    /// - Valid: "B12", "TRAM-3", "KRL-CGK-01"
    /// - Invalid: "-B12", "b12", "B 12", "B--12"
    pub static ref ROUTE_CODE_REGEX: Regex = Regex::new(r"^[A-Z0-9]+(?:-[A-Z0-9]+)*$").unwrap();

    /// Regex for vehicle codes reported by the fleet sync.
    /// Uppercase alphanumeric with optional hyphens, 2-32 chars
    /// - Valid: "BUS-0412", "TR07"
    /// - Invalid: "bus-0412", "B", "BUS_0412"
    pub static ref VEHICLE_CODE_REGEX: Regex =
        Regex::new(r"^[A-Z0-9][A-Z0-9-]{1,31}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_code_regex_valid() {
        assert!(ROUTE_CODE_REGEX.is_match("B12"));
        assert!(ROUTE_CODE_REGEX.is_match("TRAM-3"));
        assert!(ROUTE_CODE_REGEX.is_match("KRL-CGK-01"));
    }

    #[test]
    fn test_route_code_regex_invalid() {
        assert!(!ROUTE_CODE_REGEX.is_match("-B12")); // starts with hyphen
        assert!(!ROUTE_CODE_REGEX.is_match("B12-")); // ends with hyphen
        assert!(!ROUTE_CODE_REGEX.is_match("b12")); // lowercase
        assert!(!ROUTE_CODE_REGEX.is_match("B 12")); // space
        assert!(!ROUTE_CODE_REGEX.is_match("B--12")); // double hyphen
        assert!(!ROUTE_CODE_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_vehicle_code_regex() {
        assert!(VEHICLE_CODE_REGEX.is_match("BUS-0412"));
        assert!(VEHICLE_CODE_REGEX.is_match("TR07"));
        assert!(!VEHICLE_CODE_REGEX.is_match("bus-0412"));
        assert!(!VEHICLE_CODE_REGEX.is_match("B"));
        assert!(!VEHICLE_CODE_REGEX.is_match("BUS_0412"));
    }
}
