use serde::{Deserialize, Serialize};

pub const LOCATION_NOT_SPECIFIED: &str = "Location not specified";

/// Structured location fields kept alongside a posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressExtra {
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub extra: Option<AddressExtra>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Builds the multi-line location shown on a posting.
///
/// A non-empty `address` is returned verbatim. Otherwise the street line is
/// followed by a `city, state, postal` line, and the fallback text is used
/// when nothing is available.
pub fn format_address(input: &AddressInput) -> String {
    if let Some(address) = present(&input.address) {
        return address.to_string();
    }

    let empty = AddressExtra::default();
    let extra = input.extra.as_ref().unwrap_or(&empty);

    let locality = [&extra.city, &extra.state, &input.postal_code]
        .into_iter()
        .filter_map(present)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines: Vec<&str> = Vec::new();
    if let Some(street) = present(&extra.street_address) {
        lines.push(street);
    }
    if !locality.is_empty() {
        lines.push(&locality);
    }

    if lines.is_empty() {
        LOCATION_NOT_SPECIFIED.to_string()
    } else {
        lines.join("\n")
    }
}

/// City and state joined for compact card display.
pub fn format_locality(city: Option<&str>, state: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [city, state]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
