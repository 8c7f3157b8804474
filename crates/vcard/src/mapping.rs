//! ContactRecord <-> vCard property mapping

use xport_core::{ContactRecord, Gender, PhoneKind, PhoneNumber};

use crate::error::{Result, VCardError};
use crate::property::{split_structured, unescape_text, Property};

pub(crate) const GENDER_PROPERTY: &str = "X-GENDER";

/// Properties describing `record`, excluding BEGIN/VERSION/END
pub(crate) fn to_properties(record: &ContactRecord) -> Vec<Property> {
    let mut props = Vec::with_capacity(10);

    let name = &record.name;
    props.push(Property::structured(
        "N",
        &[],
        &[name.last.as_str(), name.first.as_str(), "", "", ""],
    ));
    props.push(Property::text("FN", &[], &name.formatted()));

    let address = &record.address;
    if !address.street.is_empty() || !address.locality.is_empty() {
        props.push(Property::structured(
            "ADR",
            &["HOME"],
            &["", "", address.street.as_str(), address.locality.as_str(), "", "", ""],
        ));
    }

    for phone in &record.phones {
        let types: &[&str] = match phone.kind {
            PhoneKind::Landline => &["HOME", "VOICE"],
            PhoneKind::Mobile => &["CELL"],
        };
        props.push(Property::text("TEL", types, &phone.number));
    }

    if !record.email.is_empty() {
        props.push(Property::text("EMAIL", &["INTERNET"], &record.email));
    }

    props.push(Property::text(GENDER_PROPERTY, &[], record.gender.as_str()));

    let org = &record.organization;
    if !org.name.is_empty() || !org.department.is_empty() {
        props.push(Property::structured("ORG", &[], &[org.name.as_str(), org.department.as_str()]));
    }
    if !org.role.is_empty() {
        props.push(Property::text("ROLE", &[], &org.role));
    }

    props
}

/// Fold one property into `record`. Unknown properties are ignored.
pub(crate) fn apply_property(
    record: &mut ContactRecord,
    line: usize,
    prop: &Property,
) -> Result<()> {
    match prop.name.as_str() {
        "N" => {
            let mut parts = split_structured(&prop.value).into_iter();
            record.name.last = parts.next().unwrap_or_default();
            record.name.first = parts.next().unwrap_or_default();
        }
        "ADR" => {
            let parts = split_structured(&prop.value);
            record.address.street = parts.get(2).cloned().unwrap_or_default();
            record.address.locality = parts.get(3).cloned().unwrap_or_default();
        }
        "TEL" => {
            let kind = if prop.has_type("CELL") {
                PhoneKind::Mobile
            } else {
                PhoneKind::Landline
            };
            record
                .phones
                .push(PhoneNumber::new(unescape_text(&prop.value), kind));
        }
        "EMAIL" => record.email = unescape_text(&prop.value),
        GENDER_PROPERTY => {
            record.gender = unescape_text(&prop.value)
                .parse::<Gender>()
                .map_err(|source| VCardError::InvalidValue { line, source })?;
        }
        "ORG" => {
            let mut parts = split_structured(&prop.value).into_iter();
            record.organization.name = parts.next().unwrap_or_default();
            record.organization.department = parts.next().unwrap_or_default();
        }
        "ROLE" => record.organization.role = unescape_text(&prop.value),
        _ => {}
    }
    Ok(())
}
