use std::collections::HashSet;

use super::FieldKind;
use crate::error::SchemaError;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Column holding the respondent identifier in both survey tables
pub const ID_COLUMN: &str = "respondent_id";
/// Seasonal flu vaccination status
pub const SEASONAL_TARGET: &str = "seasonal_vaccine";
/// H1N1 vaccination status
pub const H1N1_TARGET: &str = "h1n1_vaccine";

/// Opinion and knowledge fields about the H1N1 vaccine
///
/// These are dropped from the default seasonal schema since they describe a different vaccine.
pub const H1N1_FIELDS: [&str; 6] = [
    "h1n1_concern",
    "h1n1_knowledge",
    "doctor_recc_h1n1",
    "opinion_h1n1_vacc_effective",
    "opinion_h1n1_risk",
    "opinion_h1n1_sick_from_vacc",
];

const OPINION: FieldKind = FieldKind::Ordinal { min: 1, max: 5 };

const SURVEY_FIELDS: [(&str, FieldKind); 35] = [
    ("h1n1_concern", FieldKind::Ordinal { min: 0, max: 3 }),
    ("h1n1_knowledge", FieldKind::Ordinal { min: 0, max: 2 }),
    ("behavioral_antiviral_meds", FieldKind::Binary),
    ("behavioral_avoidance", FieldKind::Binary),
    ("behavioral_face_mask", FieldKind::Binary),
    ("behavioral_wash_hands", FieldKind::Binary),
    ("behavioral_large_gatherings", FieldKind::Binary),
    ("behavioral_outside_home", FieldKind::Binary),
    ("behavioral_touch_face", FieldKind::Binary),
    ("doctor_recc_h1n1", FieldKind::Binary),
    ("doctor_recc_seasonal", FieldKind::Binary),
    ("chronic_med_condition", FieldKind::Binary),
    ("child_under_6_months", FieldKind::Binary),
    ("health_worker", FieldKind::Binary),
    ("health_insurance", FieldKind::Binary),
    ("opinion_h1n1_vacc_effective", OPINION),
    ("opinion_h1n1_risk", OPINION),
    ("opinion_h1n1_sick_from_vacc", OPINION),
    ("opinion_seas_vacc_effective", OPINION),
    ("opinion_seas_risk", OPINION),
    ("opinion_seas_sick_from_vacc", OPINION),
    ("age_group", FieldKind::Categorical),
    ("education", FieldKind::Categorical),
    ("race", FieldKind::Categorical),
    ("sex", FieldKind::Categorical),
    ("income_poverty", FieldKind::Categorical),
    ("marital_status", FieldKind::Categorical),
    ("rent_or_own", FieldKind::Categorical),
    ("employment_status", FieldKind::Categorical),
    ("hhs_geo_region", FieldKind::Categorical),
    ("census_msa", FieldKind::Categorical),
    ("household_adults", FieldKind::Count),
    ("household_children", FieldKind::Count),
    ("employment_industry", FieldKind::Categorical),
    ("employment_occupation", FieldKind::Categorical),
];

/// A named field together with its kind
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
}

impl FieldSpec {
    pub fn new<S: ToString>(name: S, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.to_string(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

/// Feature schema
///
/// The ordered list of fields used as model input. The order is the order of the encoded output
/// columns, so the same schema always produces the same column layout.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Schema { fields: Vec::new() }
    }

    /// Append a field
    pub fn field<S: ToString>(mut self, name: S, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec::new(name, kind));
        self
    }

    /// Every feature field of the flu survey, in the order of the published table
    pub fn seasonal_flu() -> Self {
        SURVEY_FIELDS
            .iter()
            .fold(Schema::new(), |schema, (name, kind)| schema.field(name, *kind))
    }

    /// The survey schema without the H1N1 opinion and knowledge fields
    pub fn seasonal_flu_default() -> Self {
        Schema::seasonal_flu().exclude(&H1N1_FIELDS)
    }

    /// Drop the named fields, unknown names are ignored
    pub fn exclude<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.fields
            .retain(|f| !names.iter().any(|n| n.as_ref() == f.name));
        self
    }

    /// Checks that the schema is not empty and does not define a field twice
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        Ok(())
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasonal_schema_drops_h1n1_fields() {
        let full = Schema::seasonal_flu();
        let seasonal = Schema::seasonal_flu_default();

        assert_eq!(full.len(), 35);
        assert_eq!(seasonal.len(), 35 - H1N1_FIELDS.len());
        for name in H1N1_FIELDS.iter() {
            assert!(full.contains(name));
            assert!(!seasonal.contains(name));
        }
        assert!(seasonal.validate().is_ok());
    }

    #[test]
    fn sparse_fields_have_expected_kinds() {
        let schema = Schema::seasonal_flu_default();
        assert_eq!(
            schema.get("health_insurance").map(|f| f.kind()),
            Some(FieldKind::Binary)
        );
        assert_eq!(
            schema.get("employment_industry").map(|f| f.kind()),
            Some(FieldKind::Categorical)
        );
        assert_eq!(
            schema.get("household_children").map(|f| f.kind()),
            Some(FieldKind::Count)
        );
    }

    #[test]
    fn exclusion_list_is_configurable() {
        let schema = Schema::seasonal_flu_default().exclude(&["census_msa", "not_a_field"]);
        assert!(!schema.contains("census_msa"));
        assert_eq!(schema.len(), 35 - H1N1_FIELDS.len() - 1);
    }

    #[test]
    fn invalid_schemas_are_rejected() {
        assert_eq!(Schema::new().validate(), Err(SchemaError::EmptySchema));

        let schema = Schema::new()
            .field("sex", FieldKind::Categorical)
            .field("sex", FieldKind::Binary);
        assert_eq!(
            schema.validate(),
            Err(SchemaError::DuplicateField("sex".into()))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn schema_can_be_persisted() {
        let schema = Schema::seasonal_flu_default();
        let json = serde_json::to_string(&schema).unwrap();
        let restored: Schema = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, schema);
    }
}
