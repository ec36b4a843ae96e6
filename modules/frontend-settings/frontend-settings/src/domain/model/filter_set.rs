use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use settings_auth::Identity;
use utoipa::ToSchema;

/// How the filters of a set combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinOperator {
    And,
    Or,
}

impl JoinOperator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }
}

/// Saved set of process filters. Private to its owner unless `public`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    pub id: i32,
    pub name: String,
    pub filters: Value,
    pub join_operator: Option<JoinOperator>,
    pub public: bool,
    pub tmo_info: Map<String, Value>,
    pub priority: i32,
    pub hidden: bool,
    pub created_by: String,
    pub created_by_sub: String,
}

impl FilterSet {
    /// Replaces the user-editable fields. Ownership stays.
    pub fn replace_with(&mut self, input: FilterSetInput) {
        self.name = input.name;
        self.filters = input.filters;
        self.join_operator = input.join_operator;
        self.public = input.public;
        self.tmo_info = input.tmo_info;
        self.priority = input.priority;
        self.hidden = input.hidden;
    }

    /// Applies the fields present in `patch`.
    pub fn apply(&mut self, patch: FilterSetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(filters) = patch.filters {
            self.filters = filters;
        }
        if let Some(join_operator) = patch.join_operator {
            self.join_operator = join_operator;
        }
        if let Some(public) = patch.public {
            self.public = public;
        }
        if let Some(tmo_info) = patch.tmo_info {
            self.tmo_info = tmo_info;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
    }
}

/// Body of filter set create and replace requests.
#[derive(Debug, Clone)]
pub struct FilterSetInput {
    pub name: String,
    pub filters: Value,
    pub join_operator: Option<JoinOperator>,
    pub public: bool,
    pub tmo_info: Map<String, Value>,
    pub priority: i32,
    pub hidden: bool,
}

impl FilterSetInput {
    #[must_use]
    pub fn into_record(self, owner: &Identity) -> FilterSet {
        FilterSet {
            id: 0,
            name: self.name,
            filters: self.filters,
            join_operator: self.join_operator,
            public: self.public,
            tmo_info: self.tmo_info,
            priority: self.priority,
            hidden: self.hidden,
            created_by: owner.name.clone(),
            created_by_sub: owner.subject.clone(),
        }
    }
}

/// One element of a batch update. `join_operator: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct FilterSetPatch {
    pub id: i32,
    pub name: Option<String>,
    pub filters: Option<Value>,
    pub join_operator: Option<Option<JoinOperator>>,
    pub public: Option<bool>,
    pub tmo_info: Option<Map<String, Value>>,
    pub priority: Option<i32>,
    pub hidden: Option<bool>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> FilterSet {
        FilterSetInput {
            name: "late orders".to_owned(),
            filters: json!([{"column": "state", "value": "late"}]),
            join_operator: Some(JoinOperator::And),
            public: false,
            tmo_info: Map::new(),
            priority: 1,
            hidden: false,
        }
        .into_record(&Identity::anonymous("__admin"))
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let mut set = stored();
        set.apply(FilterSetPatch {
            id: 1,
            priority: Some(5),
            join_operator: Some(None),
            ..FilterSetPatch::default()
        });
        assert_eq!(set.priority, 5);
        assert_eq!(set.join_operator, None);
        assert_eq!(set.name, "late orders");
        assert!(!set.public);
    }

    #[test]
    fn join_operator_strings_round_trip() {
        for op in [JoinOperator::And, JoinOperator::Or] {
            assert_eq!(JoinOperator::parse(op.as_str()), Some(op));
        }
        assert_eq!(JoinOperator::parse("and"), None);
    }
}
