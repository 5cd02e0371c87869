//! Journey selection types and their translation into the creation payload.

use std::fmt;

use crate::api::{JourneyCreateRequest, LocationTarget};
use crate::core::catalog::CatalogEntry;

/// Origin tag attached to journeys created from this client.
pub const CREATED_FROM_CLI: &str = "cli";

const ZIP_LABEL_PREVIEW: usize = 3;

/// A ZIP token that is not exactly five ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidZip {
    pub token: String,
}

impl fmt::Display for InvalidZip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipping invalid ZIP: {}", self.token)
    }
}

impl std::error::Error for InvalidZip {}

pub fn validate_zip(token: &str) -> Result<String, InvalidZip> {
    if token.len() == 5 && token.bytes().all(|b| b.is_ascii_digit()) {
        Ok(token.to_string())
    } else {
        Err(InvalidZip {
            token: token.to_string(),
        })
    }
}

/// Result of splitting a comma-separated ZIP entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZipParse {
    pub valid: Vec<String>,
    pub rejected: Vec<InvalidZip>,
}

/// Split on commas and validate every token on its own. Blank tokens (from a
/// trailing or doubled comma) are ignored rather than reported.
pub fn parse_zip_codes(input: &str) -> ZipParse {
    let mut parsed = ZipParse::default();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match validate_zip(token) {
            Ok(zip) => parsed.valid.push(zip),
            Err(invalid) => parsed.rejected.push(invalid),
        }
    }
    parsed
}

/// Where a journey should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSelection {
    Zip { zip_codes: Vec<String>, label: String },
    State { code: String, label: String },
    Archetype { id: String, label: String },
}

impl LocationSelection {
    /// Build a ZIP selection. Returns `None` for an empty list.
    pub fn zip(zip_codes: Vec<String>) -> Option<Self> {
        if zip_codes.is_empty() {
            return None;
        }
        let label = zip_label(&zip_codes);
        Some(LocationSelection::Zip { zip_codes, label })
    }

    pub fn state(entry: &CatalogEntry) -> Self {
        LocationSelection::State {
            code: entry.id.to_string(),
            label: entry.label.to_string(),
        }
    }

    pub fn archetype(entry: &CatalogEntry) -> Self {
        LocationSelection::Archetype {
            id: entry.id.to_string(),
            label: entry.label.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LocationSelection::Zip { label, .. }
            | LocationSelection::State { label, .. }
            | LocationSelection::Archetype { label, .. } => label,
        }
    }
}

fn zip_label(zip_codes: &[String]) -> String {
    let preview = zip_codes
        .iter()
        .take(ZIP_LABEL_PREVIEW)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if zip_codes.len() > ZIP_LABEL_PREVIEW {
        format!("ZIP: {preview} +{} more", zip_codes.len() - ZIP_LABEL_PREVIEW)
    } else {
        format!("ZIP: {preview}")
    }
}

/// Everything the operator confirmed in the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneySelection {
    pub campaign: CatalogEntry,
    pub location: LocationSelection,
}

/// The wire-side target. Exactly one representation exists per journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyTarget {
    ZipCodes(Vec<String>),
    Locations(Vec<LocationTarget>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyParams {
    pub campaign_type: String,
    pub name: String,
    pub location_description: String,
    pub target: JourneyTarget,
}

impl JourneyParams {
    pub fn into_request(self, user_id: Option<String>) -> JourneyCreateRequest {
        let (locations, zip_codes) = match self.target {
            JourneyTarget::Locations(locations) => (Some(locations), None),
            JourneyTarget::ZipCodes(zip_codes) => (None, Some(zip_codes)),
        };
        JourneyCreateRequest {
            campaign_type: self.campaign_type,
            name: self.name,
            user_id,
            created_from: CREATED_FROM_CLI.to_string(),
            locations,
            zip_codes,
        }
    }
}

pub fn format_journey_params_for_api(selection: &JourneySelection) -> JourneyParams {
    let location = &selection.location;
    let target = match location {
        LocationSelection::Zip { zip_codes, .. } => JourneyTarget::ZipCodes(zip_codes.clone()),
        LocationSelection::State { code, .. } => JourneyTarget::Locations(vec![LocationTarget {
            kind: "state".to_string(),
            value: code.clone(),
        }]),
        LocationSelection::Archetype { id, .. } => JourneyTarget::Locations(vec![LocationTarget {
            kind: "cluster".to_string(),
            value: id.clone(),
        }]),
    };

    JourneyParams {
        campaign_type: selection.campaign.id.to_string(),
        name: format!("{} {} Journey", location.label(), selection.campaign.label),
        location_description: location.label().to_string(),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{find_entry, CAMPAIGN_TYPES, NATIONAL_ARCHETYPES, US_STATES};

    fn campaign(id: &str) -> CatalogEntry {
        *find_entry(CAMPAIGN_TYPES, id).unwrap()
    }

    #[test]
    fn zip_tokens_need_exactly_five_digits() {
        assert!(validate_zip("10023").is_ok());
        for bad in ["1002", "100234", "abcde", "1002a", "１００２３", ""] {
            assert!(validate_zip(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn parse_reports_and_skips_invalid_tokens() {
        let parsed = parse_zip_codes("10023, abc, 1002");
        assert_eq!(parsed.valid, vec!["10023".to_string()]);
        assert_eq!(
            parsed
                .rejected
                .iter()
                .map(|r| r.token.as_str())
                .collect::<Vec<_>>(),
            vec!["abc", "1002"]
        );
        assert_eq!(parsed.rejected[0].to_string(), "Skipping invalid ZIP: abc");
    }

    #[test]
    fn parse_ignores_blank_tokens() {
        let parsed = parse_zip_codes(" 10023,,10024 , ");
        assert_eq!(parsed.valid, vec!["10023", "10024"]);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn zip_label_previews_first_three() {
        let short = LocationSelection::zip(vec!["10023".into(), "10024".into()]).unwrap();
        assert_eq!(short.label(), "ZIP: 10023, 10024");

        let long = LocationSelection::zip(
            ["10023", "10024", "10025", "10026", "10027"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .unwrap();
        assert_eq!(long.label(), "ZIP: 10023, 10024, 10025 +2 more");

        assert!(LocationSelection::zip(Vec::new()).is_none());
    }

    #[test]
    fn zip_selection_populates_only_zip_codes() {
        let selection = JourneySelection {
            campaign: campaign("aep_acquisition"),
            location: LocationSelection::zip(vec!["33101".into()]).unwrap(),
        };
        let params = format_journey_params_for_api(&selection);
        assert_eq!(params.name, "ZIP: 33101 AEP Acquisition Journey");

        let request = params.into_request(Some("user-1".into()));
        assert_eq!(request.zip_codes, Some(vec!["33101".to_string()]));
        assert!(request.locations.is_none());
        assert_eq!(request.created_from, "cli");
        assert_eq!(request.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn state_and_archetype_populate_single_location() {
        let state = JourneySelection {
            campaign: campaign("turning_65"),
            location: LocationSelection::state(find_entry(US_STATES, "TX").unwrap()),
        };
        let request = format_journey_params_for_api(&state).into_request(None);
        assert_eq!(request.name, "Texas Turning 65 Journey");
        assert!(request.zip_codes.is_none());
        assert_eq!(
            request.locations,
            Some(vec![LocationTarget {
                kind: "state".into(),
                value: "TX".into()
            }])
        );

        let archetype = JourneySelection {
            campaign: campaign("winback"),
            location: LocationSelection::archetype(
                find_entry(NATIONAL_ARCHETYPES, "nat_rust_belt").unwrap(),
            ),
        };
        let request = format_journey_params_for_api(&archetype).into_request(None);
        assert!(request.zip_codes.is_none());
        assert_eq!(
            request.locations,
            Some(vec![LocationTarget {
                kind: "cluster".into(),
                value: "nat_rust_belt".into()
            }])
        );
    }
}
