//! Total mappings from free-text OSM values to closed POS enumerations.
//!
//! Unknown inputs never fail. They resolve to a documented default and are
//! reported as [`Classification::DefaultedFrom`] so callers can tell a real
//! match from a fallback.

use tracing::warn;

use super::{CampusType, Error, PosType};

/// Campus assumed for postal codes outside the known campus areas.
pub const DEFAULT_CAMPUS: CampusType = CampusType::Altstadt;

/// POS type assumed for unrecognised amenities.
pub const DEFAULT_POS_TYPE: PosType = PosType::Cafe;

/// Outcome of a default-on-unknown classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<T> {
    /// The input matched a known value.
    Known(T),
    /// The input was not recognised; `value` is the default.
    DefaultedFrom {
        /// Default value applied.
        value: T,
        /// Input that failed to match.
        raw: String,
    },
}

impl<T: Copy> Classification<T> {
    /// The classified value, whether matched or defaulted.
    pub fn value(&self) -> T {
        match self {
            Self::Known(value) | Self::DefaultedFrom { value, .. } => *value,
        }
    }

    /// Whether the default was applied.
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::DefaultedFrom { .. })
    }
}

/// Classify an OSM `amenity` value, ignoring ASCII case.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an empty amenity. Validation
/// rejects empty amenities first, so this only fires on a pipeline bug.
///
/// # Examples
/// ```
/// use campus_coffee::domain::{Classification, PosType, classify_amenity};
///
/// assert_eq!(classify_amenity("Bakery")?, Classification::Known(PosType::Bakery));
/// assert!(classify_amenity("restaurant")?.is_defaulted());
/// # Ok::<(), campus_coffee::domain::Error>(())
/// ```
pub fn classify_amenity(amenity: &str) -> Result<Classification<PosType>, Error> {
    if amenity.is_empty() {
        return Err(Error::invalid_argument("amenity must not be empty"));
    }

    let known = match amenity.to_ascii_lowercase().as_str() {
        "cafe" => Some(PosType::Cafe),
        "vending_machine" => Some(PosType::VendingMachine),
        "bakery" => Some(PosType::Bakery),
        "cafeteria" => Some(PosType::Cafeteria),
        _ => None,
    };

    Ok(known.map_or_else(
        || {
            warn!(
                amenity,
                default = %DEFAULT_POS_TYPE,
                "unknown amenity, using default POS type"
            );
            Classification::DefaultedFrom {
                value: DEFAULT_POS_TYPE,
                raw: amenity.to_owned(),
            }
        },
        Classification::Known,
    ))
}

/// Classify a postal code into a campus.
pub fn classify_postal_code(postal_code: i32) -> Classification<CampusType> {
    match postal_code {
        69117 => Classification::Known(CampusType::Altstadt),
        69115 => Classification::Known(CampusType::Bergheim),
        69120 => Classification::Known(CampusType::Inf),
        other => {
            warn!(
                postal_code = other,
                default = %DEFAULT_CAMPUS,
                "unknown postal code, using default campus"
            );
            Classification::DefaultedFrom {
                value: DEFAULT_CAMPUS,
                raw: other.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Exact matches and default arms.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cafe", PosType::Cafe)]
    #[case("vending_machine", PosType::VendingMachine)]
    #[case("bakery", PosType::Bakery)]
    #[case("cafeteria", PosType::Cafeteria)]
    #[case("BAKERY", PosType::Bakery)]
    #[case("Vending_Machine", PosType::VendingMachine)]
    fn known_amenities_match(#[case] amenity: &str, #[case] expected: PosType) {
        let classification = classify_amenity(amenity).expect("amenity is non-empty");
        assert_eq!(classification, Classification::Known(expected));
    }

    #[rstest]
    fn unknown_amenity_defaults_to_cafe() {
        let classification = classify_amenity("restaurant").expect("amenity is non-empty");
        // `DefaultedFrom` is only built in the arm that emits the warning.
        assert_eq!(
            classification,
            Classification::DefaultedFrom {
                value: PosType::Cafe,
                raw: "restaurant".to_owned(),
            }
        );
        assert_eq!(classification.value(), PosType::Cafe);
    }

    #[rstest]
    fn empty_amenity_is_an_invalid_argument() {
        let error = classify_amenity("").expect_err("empty amenity is a precondition bug");
        assert!(matches!(error, Error::InvalidArgument { .. }));
    }

    #[rstest]
    #[case(69117, CampusType::Altstadt)]
    #[case(69115, CampusType::Bergheim)]
    #[case(69120, CampusType::Inf)]
    fn known_postal_codes_match(#[case] postal_code: i32, #[case] expected: CampusType) {
        let classification = classify_postal_code(postal_code);
        assert!(!classification.is_defaulted());
        assert_eq!(classification.value(), expected);
    }

    #[rstest]
    #[case(12345)]
    #[case(69121)]
    #[case(0)]
    #[case(-1)]
    fn unknown_postal_codes_default_to_altstadt(#[case] postal_code: i32) {
        let classification = classify_postal_code(postal_code);
        // The warning is emitted exactly when the default arm is taken.
        assert!(classification.is_defaulted());
        assert_eq!(classification.value(), CampusType::Altstadt);
    }
}
