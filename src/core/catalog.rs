//! Fixed selection catalogs offered by the journey wizard.

/// One selectable row in a numbered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
}

const fn entry(id: &'static str, label: &'static str, description: &'static str) -> CatalogEntry {
    CatalogEntry {
        id,
        label,
        description: Some(description),
    }
}

const fn state(id: &'static str, label: &'static str) -> CatalogEntry {
    CatalogEntry {
        id,
        label,
        description: None,
    }
}

pub const CAMPAIGN_TYPES: &[CatalogEntry] = &[
    entry(
        "aep_acquisition",
        "AEP Acquisition",
        "New enrollments during Annual Enrollment (Oct 15 - Dec 7)",
    ),
    entry("aep_retention", "AEP Retention", "Keeping current members during AEP"),
    entry("turning_65", "Turning 65", "New-to-Medicare (Initial Enrollment Period)"),
    entry("dsnp", "D-SNP", "Dual Eligible Special Needs Plans (Medicare + Medicaid)"),
    entry("oep_retention", "OEP Retention", "Open Enrollment Period retention"),
    entry("sep_acquisition", "SEP Acquisition", "Special Enrollment Period acquisition"),
    entry("winback", "Winback", "Re-engaging lapsed members"),
];

pub const LOCATION_KINDS: &[CatalogEntry] = &[
    entry("zip", "ZIP Code(s)", "Enter specific ZIP codes"),
    entry("state", "State", "Select a state (will show market clusters)"),
    entry("archetype", "National Archetype", "Target a national market segment"),
];

pub const NATIONAL_ARCHETYPES: &[CatalogEntry] = &[
    entry(
        "nat_urban_coastal_affluent",
        "Urban Coastal Affluent",
        "High-income coastal metros, digitally-savvy seniors",
    ),
    entry(
        "nat_diverse_urban",
        "Diverse Urban",
        "Multicultural neighborhoods, high language diversity",
    ),
    entry(
        "nat_hispanic_border",
        "Hispanic Border & Gateway",
        "Spanish-dominant border communities and gateway cities",
    ),
    entry(
        "nat_suburban_middle",
        "Suburban Middle America",
        "Middle-income heartland and Sun Belt suburbs",
    ),
    entry(
        "nat_sun_belt_retiree",
        "Sun Belt Retiree",
        "Planned retirement communities in FL, AZ, Southwest",
    ),
    entry(
        "nat_rural_agricultural",
        "Rural Agricultural",
        "Farming communities in Midwest and Great Plains",
    ),
    entry(
        "nat_rural_appalachian",
        "Rural Appalachian",
        "Appalachian and rural Eastern, limited healthcare access",
    ),
    entry(
        "nat_rust_belt",
        "Rust Belt Industrial",
        "Former industrial cities in Midwest and Northeast",
    ),
];

pub const US_STATES: &[CatalogEntry] = &[
    state("AL", "Alabama"),
    state("AK", "Alaska"),
    state("AZ", "Arizona"),
    state("AR", "Arkansas"),
    state("CA", "California"),
    state("CO", "Colorado"),
    state("CT", "Connecticut"),
    state("DE", "Delaware"),
    state("FL", "Florida"),
    state("GA", "Georgia"),
    state("HI", "Hawaii"),
    state("ID", "Idaho"),
    state("IL", "Illinois"),
    state("IN", "Indiana"),
    state("IA", "Iowa"),
    state("KS", "Kansas"),
    state("KY", "Kentucky"),
    state("LA", "Louisiana"),
    state("ME", "Maine"),
    state("MD", "Maryland"),
    state("MA", "Massachusetts"),
    state("MI", "Michigan"),
    state("MN", "Minnesota"),
    state("MS", "Mississippi"),
    state("MO", "Missouri"),
    state("MT", "Montana"),
    state("NE", "Nebraska"),
    state("NV", "Nevada"),
    state("NH", "New Hampshire"),
    state("NJ", "New Jersey"),
    state("NM", "New Mexico"),
    state("NY", "New York"),
    state("NC", "North Carolina"),
    state("ND", "North Dakota"),
    state("OH", "Ohio"),
    state("OK", "Oklahoma"),
    state("OR", "Oregon"),
    state("PA", "Pennsylvania"),
    state("RI", "Rhode Island"),
    state("SC", "South Carolina"),
    state("SD", "South Dakota"),
    state("TN", "Tennessee"),
    state("TX", "Texas"),
    state("UT", "Utah"),
    state("VT", "Vermont"),
    state("VA", "Virginia"),
    state("WA", "Washington"),
    state("WV", "West Virginia"),
    state("WI", "Wisconsin"),
    state("WY", "Wyoming"),
    state("DC", "District of Columbia"),
];

/// Actions offered on the confirmation summary, in display order.
pub const CONFIRM_ACTIONS: &[CatalogEntry] = &[
    entry("create", "Create Journey", "Build the journey now"),
    entry("edit", "Edit Selection", "Go back and change selections"),
];

pub fn find_entry(catalog: &'static [CatalogEntry], id: &str) -> Option<&'static CatalogEntry> {
    catalog.iter().find(|entry| entry.id == id)
}
