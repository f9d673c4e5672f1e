//! Declarative read queries for the record store.
//!
//! A [`Query`] describes what to fetch - field projection, flat filters
//! combined by implicit AND, OR-grouped subconditions, and sort order -
//! without depending on the store's wire shape at the call sites. The
//! conditions are a small closed set of tagged variants; serialization to
//! the store's wire JSON is exhaustive over them.
//!
//! Wire format, for reference:
//!
//! ```json
//! {
//!   "fields": [{"field": {"Name": "name_c"}}],
//!   "where": [{"FieldName": "category_c", "Operator": "EqualTo", "Values": ["dresses"]}],
//!   "whereGroups": [{"operator": "OR", "subGroups": [
//!     {"conditions": [{"fieldName": "name_c", "operator": "Contains", "values": ["silk"]}]}
//!   ]}],
//!   "orderBy": [{"fieldName": "created_at_c", "sorttype": "DESC"}]
//! }
//! ```
//!
//! The flat `where` entries use capitalized keys while group conditions use
//! lowercase ones; that asymmetry is the store's, not ours.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

// =============================================================================
// Conditions
// =============================================================================

/// A single field filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value exactly.
    Equals { field: String, value: Value },
    /// Field contains the value as a substring.
    Contains { field: String, value: Value },
}

impl Condition {
    fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. } | Self::Contains { field, .. } => field,
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            Self::Equals { .. } => "EqualTo",
            Self::Contains { .. } => "Contains",
        }
    }

    fn value(&self) -> &Value {
        match self {
            Self::Equals { value, .. } | Self::Contains { value, .. } => value,
        }
    }
}

/// Build an equality condition.
pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Condition {
    Condition::Equals {
        field: field.into(),
        value: value.into(),
    }
}

/// Build a substring-match condition.
pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Condition {
    Condition::Contains {
        field: field.into(),
        value: value.into(),
    }
}

/// A group of conditions matched if any subcondition matches.
#[derive(Debug, Clone, PartialEq)]
pub struct OrGroup(Vec<Condition>);

/// Sort direction for an ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    const fn wire(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Sort {
    field: String,
    direction: SortDirection,
}

// =============================================================================
// Query
// =============================================================================

/// A declarative read query: projection, filters, OR groups, sort order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    fields: Vec<String>,
    conditions: Vec<Condition>,
    groups: Vec<OrGroup>,
    sorts: Vec<Sort>,
}

impl Query {
    /// Start a query projecting the given fields.
    ///
    /// The store returns only projected fields; there is no "all fields"
    /// default, so every domain-relevant field must be listed.
    pub fn select<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a flat filter condition; multiple conditions AND together.
    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add an OR group: the record matches if any subcondition matches.
    ///
    /// An empty or unmatched group yields an empty result from the store,
    /// not an error.
    #[must_use]
    pub fn any_of(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.groups
            .push(OrGroup(conditions.into_iter().collect()));
        self
    }

    /// Append a sort key. Keys apply in the order they are added.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sorts.push(Sort {
            field: field.into(),
            direction,
        });
        self
    }
}

// =============================================================================
// Wire serialization
// =============================================================================

#[derive(serde::Serialize)]
struct WireFieldName<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
}

#[derive(serde::Serialize)]
struct WireField<'a> {
    field: WireFieldName<'a>,
}

#[derive(serde::Serialize)]
struct WireFlatCondition<'a> {
    #[serde(rename = "FieldName")]
    field_name: &'a str,
    #[serde(rename = "Operator")]
    operator: &'static str,
    #[serde(rename = "Values")]
    values: [&'a Value; 1],
}

#[derive(serde::Serialize)]
struct WireGroupCondition<'a> {
    #[serde(rename = "fieldName")]
    field_name: &'a str,
    operator: &'static str,
    values: [&'a Value; 1],
}

#[derive(serde::Serialize)]
struct WireSubGroup<'a> {
    conditions: [WireGroupCondition<'a>; 1],
}

#[derive(serde::Serialize)]
struct WireGroup<'a> {
    operator: &'static str,
    #[serde(rename = "subGroups")]
    sub_groups: Vec<WireSubGroup<'a>>,
}

#[derive(serde::Serialize)]
struct WireSort<'a> {
    #[serde(rename = "fieldName")]
    field_name: &'a str,
    sorttype: &'static str,
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields: Vec<WireField<'_>> = self
            .fields
            .iter()
            .map(|name| WireField {
                field: WireFieldName { name },
            })
            .collect();
        let conditions: Vec<WireFlatCondition<'_>> = self
            .conditions
            .iter()
            .map(|c| WireFlatCondition {
                field_name: c.field(),
                operator: c.operator(),
                values: [c.value()],
            })
            .collect();
        // Each subcondition becomes its own single-condition subgroup.
        let groups: Vec<WireGroup<'_>> = self
            .groups
            .iter()
            .map(|OrGroup(subconditions)| WireGroup {
                operator: "OR",
                sub_groups: subconditions
                    .iter()
                    .map(|c| WireSubGroup {
                        conditions: [WireGroupCondition {
                            field_name: c.field(),
                            operator: c.operator(),
                            values: [c.value()],
                        }],
                    })
                    .collect(),
            })
            .collect();
        let sorts: Vec<WireSort<'_>> = self
            .sorts
            .iter()
            .map(|s| WireSort {
                field_name: &s.field,
                sorttype: s.direction.wire(),
            })
            .collect();

        let len = 1
            + usize::from(!conditions.is_empty())
            + usize::from(!groups.is_empty())
            + usize::from(!sorts.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("fields", &fields)?;
        if !conditions.is_empty() {
            map.serialize_entry("where", &conditions)?;
        }
        if !groups.is_empty() {
            map.serialize_entry("whereGroups", &groups)?;
        }
        if !sorts.is_empty() {
            map.serialize_entry("orderBy", &sorts)?;
        }
        map.end()
    }
}
