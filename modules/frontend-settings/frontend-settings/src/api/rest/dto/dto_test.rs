#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;

use super::*;
use crate::domain::model::{
    ColorRange, ColorRangePatch, Direction, FilterSetInput, FilterSetPatch, JoinOperator,
    LogFilter, LogSortField, NewColorRange, PresetInput, SortDirection, ValueType,
};

#[test]
fn color_range_create_accepts_camel_and_snake_case() {
    let camel: ColorRangeCreateReq = serde_json::from_value(json!({
        "tmoId": "1", "tprmId": "2", "name": "n", "value_type": "Percent",
        "ranges": {"colors": []}, "withCleared": true
    }))
    .unwrap();
    let snake: ColorRangeCreateReq = serde_json::from_value(json!({
        "tmo_id": "1", "tprm_id": "2", "name": "n", "value_type": "Percent",
        "ranges": {"colors": []}, "with_cleared": true
    }))
    .unwrap();

    for req in [camel, snake] {
        let new: NewColorRange = req.into();
        assert_eq!(new.tmo_id, "1");
        assert_eq!(new.val_type, "float");
        assert_eq!(new.direction, Direction::Asc);
        assert_eq!(new.with_cleared, Some(true));
        assert!(!new.public);
        assert!(!new.is_default);
    }
}

#[test]
fn color_range_create_rejects_unknown_value_type() {
    let res: Result<ColorRangeCreateReq, _> = serde_json::from_value(json!({
        "tmoId": "1", "tprmId": "2", "name": "n", "value_type": "Gradient", "ranges": {"a": 1}
    }));
    assert!(res.is_err());
}

#[test]
fn color_range_patch_leaves_unset_fields_empty() {
    let req: ColorRangePatchReq = serde_json::from_value(json!({"name": "renamed"})).unwrap();
    let patch: ColorRangePatch = req.into();
    assert_eq!(patch.name.as_deref(), Some("renamed"));
    assert!(patch.is_default.is_none());
    assert!(patch.direction.is_none());
    assert!(patch.public.is_none());
}

#[test]
fn filter_defaults() {
    let req: ColorRangeFilterReq = serde_json::from_value(json!({})).unwrap();
    assert_eq!(req.limit, 10);
    assert_eq!(req.offset, 0);
    assert!(req.only_description);
    let filter = req.to_filter();
    assert!(filter.ids.is_empty());
    assert!(filter.val_types.is_none());
}

fn record() -> ColorRange {
    ColorRange {
        id: 3,
        tmo_id: "1".to_owned(),
        tprm_id: "2".to_owned(),
        val_type: "float".to_owned(),
        name: "traffic".to_owned(),
        value_type: ValueType::Hex,
        with_indeterminate: None,
        with_cleared: Some(false),
        ranges: json!({"colors": []}),
        public: true,
        is_default: true,
        direction: Direction::Desc,
        created_by: "Jane Doe".to_owned(),
        created_by_sub: "sub-1".to_owned(),
    }
}

#[test]
fn color_range_view_uses_camel_case() {
    let full = serde_json::to_value(ColorRangeView::new(record(), false)).unwrap();
    assert_eq!(full["tmoId"], "1");
    assert_eq!(full["valType"], "float");
    assert_eq!(full["value_type"], "Hex");
    assert_eq!(full["direction"], "desc");
    assert_eq!(full["default"], true);
    assert!(full["withIndeterminate"].is_null());

    let summary = serde_json::to_value(ColorRangeView::new(record(), true)).unwrap();
    assert!(summary.get("ranges").is_none());
    assert!(summary.get("value_type").is_none());
    assert_eq!(summary["created_by_sub"], "sub-1");
}

#[test]
fn preset_req_wraps_payloads() {
    let req: PresetReq = serde_json::from_value(json!({
        "name": "wide", "public": false, "default": true,
        "value": {"a": 1}, "order": ["a", "b"], "pinned": {"left": []}
    }))
    .unwrap();
    let input: PresetInput = req.into();
    assert_eq!(input.value, Some(json!({"a": 1})));
    assert_eq!(input.order, Some(json!(["a", "b"])));
    assert!(input.is_default);
}

#[test]
fn log_filter_accepts_naive_and_zoned_dates() {
    let req: LogFilterReq = serde_json::from_value(json!({
        "from_date": "2024-01-01T10:00:00",
        "to_date": "2024-01-02T10:00:00+02:00",
        "sort_by": [{"sort_by": "change_time", "sort_direction": "desc"}]
    }))
    .unwrap();
    let filter: LogFilter = req.into();
    assert_eq!(filter.limit, 20);
    assert_eq!(filter.from_date.unwrap().to_rfc3339(), "2024-01-01T10:00:00+00:00");
    assert_eq!(filter.to_date.unwrap().to_rfc3339(), "2024-01-02T08:00:00+00:00");
    assert_eq!(filter.sort[0].field, LogSortField::ChangeTime);
    assert_eq!(filter.sort[0].direction, SortDirection::Desc);
}

#[test]
fn log_filter_rejects_garbage_dates() {
    let res: Result<LogFilterReq, _> = serde_json::from_value(json!({"from_date": "yesterday"}));
    assert!(res.is_err());
}

#[test]
fn user_settings_default_to_empty_object() {
    let req: UserSettingsReq = serde_json::from_value(json!({})).unwrap();
    assert_eq!(req.settings, json!({}));
}

#[test]
fn filter_set_patch_tells_null_from_absent() {
    let cleared: FilterSetPatch = serde_json::from_value::<FilterSetPatchReq>(
        json!({"id": 3, "join_operator": null}),
    )
    .unwrap()
    .into();
    assert_eq!(cleared.join_operator, Some(None));

    let untouched: FilterSetPatch =
        serde_json::from_value::<FilterSetPatchReq>(json!({"id": 3, "priority": 2}))
            .unwrap()
            .into();
    assert_eq!(untouched.join_operator, None);
    assert_eq!(untouched.priority, Some(2));
}

#[test]
fn filter_set_flags_default_to_false() {
    let req: FilterSetReq = serde_json::from_value(json!({
        "name": "late", "filters": [], "join_operator": "OR",
        "tmo_info": {}, "priority": 1, "hidden": null
    }))
    .unwrap();
    let input: FilterSetInput = req.into();
    assert_eq!(input.join_operator, Some(JoinOperator::Or));
    assert!(!input.public);
    assert!(!input.hidden);

    let bad: Result<FilterSetReq, _> = serde_json::from_value(json!({
        "name": "late", "filters": [], "join_operator": "XOR", "tmo_info": {}, "priority": 1
    }));
    assert!(bad.is_err());
}

#[test]
fn filter_set_list_rows_carry_ownership_inline() {
    let input: FilterSetInput = serde_json::from_value::<FilterSetReq>(json!({
        "name": "late", "filters": [], "join_operator": null, "tmo_info": {}, "priority": 1
    }))
    .unwrap()
    .into();
    let set = input.into_record(&crate::test_support::user("alice"));

    let mine = serde_json::to_value(FilterSetListDto::for_caller(set.clone(), "alice")).unwrap();
    assert_eq!(mine["owner"], json!(true));
    assert_eq!(mine["name"], "late");
    assert!(mine.get("created_by_sub").is_none());

    let theirs = serde_json::to_value(FilterSetListDto::for_caller(set, "bob")).unwrap();
    assert_eq!(theirs["owner"], json!(false));
}
