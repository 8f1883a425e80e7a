//! Required-field checks turning normalised candidates into validated fields.

use std::fmt;

use super::osm_import_fields::NormalizedFields;
use super::{Error, OsmNodeId};

/// Fields every imported POS must carry, named after their OSM tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// `name`, `name:de` or `name:en`.
    Name,
    /// `amenity`.
    Amenity,
    /// `addr:street`.
    Street,
    /// `addr:housenumber`.
    HouseNumber,
    /// `addr:postcode` (numeric).
    PostalCode,
    /// `addr:city`.
    City,
}

impl RequiredField {
    /// OSM tag the field is read from.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Amenity => "amenity",
            Self::Street => "addr:street",
            Self::HouseNumber => "addr:housenumber",
            Self::PostalCode => "addr:postcode",
            Self::City => "addr:city",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Normalised fields with every required value present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    /// Node the fields came from.
    pub node_id: OsmNodeId,
    /// POS name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Raw amenity value.
    pub amenity: String,
    /// Street name.
    pub street: String,
    /// House number.
    pub house_number: String,
    /// Postal code.
    pub postal_code: i32,
    /// City name.
    pub city: String,
}

/// Check required fields in a fixed order and report the first gap.
///
/// Order: name, amenity, street, house number, postal code, city.
/// Only absent or empty strings count as missing.
///
/// # Errors
///
/// Returns [`Error::MissingRequiredField`] naming the node and the first
/// missing field.
pub fn validate_required_fields(
    node_id: OsmNodeId,
    fields: NormalizedFields,
) -> Result<ValidatedFields, Error> {
    let NormalizedFields {
        name,
        description,
        amenity,
        street,
        house_number,
        postal_code,
        city,
    } = fields;

    let missing = |field| Error::missing_required_field(node_id, field);

    let name = present(name).ok_or_else(|| missing(RequiredField::Name))?;
    let amenity = present(amenity).ok_or_else(|| missing(RequiredField::Amenity))?;
    let street = present(street).ok_or_else(|| missing(RequiredField::Street))?;
    let house_number = present(house_number).ok_or_else(|| missing(RequiredField::HouseNumber))?;
    let postal_code = postal_code.ok_or_else(|| missing(RequiredField::PostalCode))?;
    let city = present(city).ok_or_else(|| missing(RequiredField::City))?;

    Ok(ValidatedFields {
        node_id,
        name,
        description,
        amenity,
        street,
        house_number,
        postal_code,
        city,
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    //! Required-field coverage.

    use super::*;
    use rstest::{fixture, rstest};

    const NODE: OsmNodeId = OsmNodeId::new(5_589_879_349);

    #[fixture]
    fn complete() -> NormalizedFields {
        NormalizedFields {
            name: Some("Rada Coffee & Rösterei".to_owned()),
            description: None,
            amenity: Some("cafe".to_owned()),
            street: Some("Untere Straße".to_owned()),
            house_number: Some("21".to_owned()),
            postal_code: Some(69117),
            city: Some("Heidelberg".to_owned()),
        }
    }

    #[rstest]
    fn complete_fields_validate(complete: NormalizedFields) {
        let validated = validate_required_fields(NODE, complete).expect("fields are complete");
        assert_eq!(validated.node_id, NODE);
        assert_eq!(validated.postal_code, 69117);
        assert_eq!(validated.description, None);
    }

    #[rstest]
    fn missing_city_fails_even_when_everything_else_is_present(mut complete: NormalizedFields) {
        complete.city = None;
        let error = validate_required_fields(NODE, complete).expect_err("city is missing");
        assert_eq!(
            error,
            Error::missing_required_field(NODE, RequiredField::City)
        );
    }

    #[rstest]
    #[case::name(RequiredField::Name)]
    #[case::amenity(RequiredField::Amenity)]
    #[case::street(RequiredField::Street)]
    #[case::house_number(RequiredField::HouseNumber)]
    #[case::postal_code(RequiredField::PostalCode)]
    #[case::city(RequiredField::City)]
    fn each_missing_field_is_reported(
        mut complete: NormalizedFields,
        #[case] field: RequiredField,
    ) {
        match field {
            RequiredField::Name => complete.name = None,
            RequiredField::Amenity => complete.amenity = None,
            RequiredField::Street => complete.street = None,
            RequiredField::HouseNumber => complete.house_number = None,
            RequiredField::PostalCode => complete.postal_code = None,
            RequiredField::City => complete.city = None,
        }

        let error = validate_required_fields(NODE, complete).expect_err("field is missing");
        assert_eq!(error, Error::missing_required_field(NODE, field));
    }

    #[rstest]
    fn blank_strings_are_present(mut complete: NormalizedFields) {
        complete.house_number = Some(" ".to_owned());
        let validated = validate_required_fields(NODE, complete).expect("blank is not empty");
        assert_eq!(validated.house_number, " ");
    }

    #[rstest]
    fn empty_strings_count_as_missing(mut complete: NormalizedFields) {
        complete.street = Some(String::new());
        let error = validate_required_fields(NODE, complete).expect_err("street is empty");
        assert_eq!(
            error,
            Error::missing_required_field(NODE, RequiredField::Street)
        );
    }

    #[rstest]
    fn first_missing_field_in_order_is_reported(mut complete: NormalizedFields) {
        complete.amenity = None;
        complete.city = None;
        let error = validate_required_fields(NODE, complete).expect_err("two fields missing");
        assert_eq!(
            error,
            Error::missing_required_field(NODE, RequiredField::Amenity)
        );
    }
}
