use edu_insights::{Analytics, ImprovementStatus, Overview, Priority};

#[test]
fn test_overview_kpis_in_display_order() {
    let overview = Overview::sample();
    let names: Vec<&str> = overview.kpis.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Production time",
            "Week 1 completion",
            "Target fit",
            "Update lead time",
            "Reuse rate",
        ]
    );

    let months: Vec<&str> = overview.monthly.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["Aug", "Sep", "Oct", "Nov", "Dec"]);
}

#[test]
fn test_analytics_cards_by_priority() {
    let analytics = Analytics::sample();
    let priorities: Vec<Priority> = analytics
        .improvements()
        .iter()
        .map(|c| c.priority)
        .collect();
    assert_eq!(
        priorities,
        vec![Priority::High, Priority::Medium, Priority::Low]
    );
    assert_eq!(
        analytics.improvements()[1].status,
        ImprovementStatus::InProgress
    );
}

#[test]
fn test_overview_serializes_for_json_output() {
    let json = serde_json::to_value(Overview::sample()).unwrap();
    assert_eq!(json["kpis"][0]["trend"], "up");
    assert_eq!(json["monthly"][0]["productionMinutes"], 240);
    assert_eq!(json["generation"][4]["count"], 384);
}
