use serde_json::Value;
use settings_auth::Identity;

/// Table presets share one table, discriminated by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetKind {
    Columns,
    Filters,
    ObjectParams,
}

impl PresetKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Columns => "columns",
            Self::Filters => "filters",
            Self::ObjectParams => "object_params",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "columns" => Some(Self::Columns),
            "filters" => Some(Self::Filters),
            "object_params" => Some(Self::ObjectParams),
            _ => None,
        }
    }

    /// Only column presets carry `order` and `pinned`.
    #[must_use]
    pub fn has_layout(self) -> bool {
        matches!(self, Self::Columns)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetScope {
    pub kind: PresetKind,
    pub tmo_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub id: i32,
    pub kind: PresetKind,
    pub tmo_id: i64,
    pub name: String,
    pub value: Option<Value>,
    pub order: Option<Value>,
    pub pinned: Option<Value>,
    pub public: bool,
    pub is_default: bool,
    pub created_by: String,
    pub created_by_sub: String,
}

impl Preset {
    #[must_use]
    pub fn scope(&self) -> PresetScope {
        PresetScope {
            kind: self.kind,
            tmo_id: self.tmo_id,
        }
    }

    /// Replaces the user-editable fields. `tmo_id` and ownership stay.
    pub fn replace_with(&mut self, input: PresetInput) {
        self.name = input.name;
        self.value = input.value;
        self.public = input.public;
        self.is_default = input.is_default;
        if self.kind.has_layout() {
            self.order = input.order;
            self.pinned = input.pinned;
        }
    }
}

/// Body of preset create and update requests.
#[derive(Debug, Clone)]
pub struct PresetInput {
    pub name: String,
    pub value: Option<Value>,
    pub public: bool,
    pub is_default: bool,
    pub order: Option<Value>,
    pub pinned: Option<Value>,
}

impl PresetInput {
    #[must_use]
    pub fn into_record(self, kind: PresetKind, tmo_id: i64, owner: &Identity) -> Preset {
        let (order, pinned) = if kind.has_layout() {
            (self.order, self.pinned)
        } else {
            (None, None)
        };
        Preset {
            id: 0,
            kind,
            tmo_id,
            name: self.name,
            value: self.value,
            order,
            pinned,
            public: self.public,
            is_default: self.is_default,
            created_by: owner.name.clone(),
            created_by_sub: owner.subject.clone(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> PresetInput {
        PresetInput {
            name: "wide".to_owned(),
            value: Some(json!({"a": 1})),
            public: false,
            is_default: false,
            order: Some(json!(["a", "b"])),
            pinned: Some(json!({"left": ["a"]})),
        }
    }

    #[test]
    fn layout_is_kept_only_for_columns() {
        let owner = Identity::anonymous("__admin");
        let columns = input().into_record(PresetKind::Columns, 7, &owner);
        assert!(columns.order.is_some());
        assert!(columns.pinned.is_some());

        let filters = input().into_record(PresetKind::Filters, 7, &owner);
        assert!(filters.order.is_none());
        assert!(filters.pinned.is_none());
    }

    #[test]
    fn kind_strings_round_trip() {
        for kind in [PresetKind::Columns, PresetKind::Filters, PresetKind::ObjectParams] {
            assert_eq!(PresetKind::parse(kind.as_str()), Some(kind));
        }
    }
}
