#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::domain::model::ColorRangeFilter;
use crate::infra::storage::OrmColorRangesRepository;
use crate::test_support::inmem_db;

use super::*;

async fn setup() -> (DatabaseConnection, PaletteService<OrmColorRangesRepository>) {
    let db = inmem_db().await;
    let svc = PaletteService::new(db.clone(), Arc::new(OrmColorRangesRepository));
    (db, svc)
}

fn pref(kpi_id: i64, name: &str, val_type: &str) -> PreferenceInstance {
    PreferenceInstance {
        kpi_id,
        preference_name: name.to_owned(),
        val_type: val_type.to_owned(),
    }
}

fn custom(kpi_id: i64, palette: &str) -> CustomPalette {
    CustomPalette {
        kpi_id,
        preference_name: "traffic".to_owned(),
        val_type: "float".to_owned(),
        object_type_id: 5,
        palette: palette.to_owned(),
    }
}

async fn stored(db: &DatabaseConnection) -> Vec<ColorRange> {
    let filter = ColorRangeFilter {
        limit: 100,
        ..ColorRangeFilter::default()
    };
    OrmColorRangesRepository
        .filter(db, &filter, "")
        .await
        .unwrap()
}

#[tokio::test]
async fn default_palettes_skip_existing_kpis() {
    let (db, svc) = setup().await;
    let mut items = BTreeMap::new();
    items.insert(5, vec![pref(7, "traffic", "int"), pref(8, "status", "str")]);

    assert!(svc.set_default_palettes(&items).await.unwrap().is_empty());

    items.insert(6, vec![pref(9, "load", "float")]);
    let wrong = svc.set_default_palettes(&items).await.unwrap();
    assert_eq!(wrong, [7, 8]);

    let ranges = stored(&db).await;
    assert_eq!(ranges.len(), 3);
    let traffic = ranges.iter().find(|r| r.tprm_id == "7").unwrap();
    assert_eq!(traffic.ranges["values"], json!([20, 80]));
    assert!(traffic.public);
    assert!(!traffic.is_default);
}

#[tokio::test]
async fn custom_palettes_replace_ranges_and_report_bad_json() {
    let (db, svc) = setup().await;
    let first = svc
        .set_custom_palettes(&[custom(7, r#"{"colors": ["red"]}"#)])
        .await
        .unwrap();
    assert!(first.is_empty());

    let wrong = svc
        .set_custom_palettes(&[
            custom(7, r#"{"colors": ["blue"]}"#),
            custom(8, "not json"),
            custom(9, "{}"),
        ])
        .await
        .unwrap();
    assert_eq!(wrong, [8, 9]);

    let ranges = stored(&db).await;
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].ranges, json!({"colors": ["blue"]}));
}
