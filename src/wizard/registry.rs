use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Court locations running the early-resolution process.
pub const EARLY_RESOLUTION_REGISTRIES: &[&str] = &["19227", "3561", "5871"];

/// Court locations served by a family justice registry.
pub const FAMILY_JUSTICE_REGISTRIES: &[&str] = &["1031", "2040", "8816"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryType {
    EarlyResolutions,
    FamilyJustice,
    /// Locations outside both other registries, where the parenting
    /// education program applies.
    ParentingEducation,
}

impl RegistryType {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::EarlyResolutions,
            Self::FamilyJustice,
            Self::ParentingEducation,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::EarlyResolutions => "early-resolutions",
            Self::FamilyJustice => "family-justice",
            Self::ParentingEducation => "parenting-education",
        }
    }

    fn contains(self, location_id: &str) -> bool {
        let early = EARLY_RESOLUTION_REGISTRIES.contains(&location_id);
        let family = FAMILY_JUSTICE_REGISTRIES.contains(&location_id);
        match self {
            Self::EarlyResolutions => early,
            Self::FamilyJustice => family,
            Self::ParentingEducation => !early && !family,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown registry type '{0}'")]
pub struct UnknownRegistryType(pub String);

impl FromStr for RegistryType {
    type Err = UnknownRegistryType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "early-resolutions" => Ok(Self::EarlyResolutions),
            "family-justice" => Ok(Self::FamilyJustice),
            "parenting-education" => Ok(Self::ParentingEducation),
            other => Err(UnknownRegistryType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read locations: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid locations CSV at line {line}: {source}")]
    Csv { line: u64, source: csv::Error },
    #[error("locations CSV did not contain any rows")]
    Empty,
}

/// Read-only list of court locations the applicant can file at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDirectory {
    locations: Vec<Location>,
}

impl LocationDirectory {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn standard() -> Self {
        let rows = [
            ("Vancouver", "19227"),
            ("Surrey", "3561"),
            ("Victoria", "5871"),
            ("Nanaimo", "1031"),
            ("Kelowna", "2040"),
            ("Port Coquitlam", "8816"),
            ("Kamloops", "4781"),
            ("Prince George", "6011"),
        ];
        Self::new(
            rows.into_iter()
                .map(|(name, id)| Location {
                    name: name.to_string(),
                    id: id.to_string(),
                })
                .collect(),
        )
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Parses a `name,id` CSV with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut locations = Vec::new();
        for record in csv_reader.deserialize::<Location>() {
            let location = record.map_err(|source| RegistryError::Csv {
                line: source.position().map(|pos| pos.line()).unwrap_or_default(),
                source,
            })?;
            locations.push(location);
        }

        if locations.is_empty() {
            return Err(RegistryError::Empty);
        }

        debug!(count = locations.len(), "loaded court locations");
        Ok(Self::new(locations))
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn find(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.name == name)
    }

    /// Whether the named location belongs to `registry`. Unknown locations
    /// belong to none.
    pub fn included_in_registries(&self, location_name: &str, registry: RegistryType) -> bool {
        self.find(location_name)
            .is_some_and(|location| registry.contains(&location.id))
    }
}
