//! Column planner behaviour on realistic course shapes.

use course_columns::models::{LayoutConfig, Orientation, Section};
use course_columns::planner::{clamp_columns, ClampBound, ColumnLayoutPlanner, ColumnWidth};
use course_columns::services::plan_outline;

mod fixtures;

use fixtures::{outline_mixed, outline_with_hidden};

fn plan_columns(count: u32, hidden: &[u32], columns: i64, orientation: Orientation) -> Vec<u32> {
    let outline = outline_with_hidden(1, count, hidden);
    let layout = plan_outline(&outline, LayoutConfig::new(columns, orientation), false, 1.0)
        .expect("plan should succeed");
    layout.placements.iter().map(|p| p.column).collect()
}

/// Every visibility pattern of `count` sections, as lists of hidden indices.
fn hidden_patterns(count: u32) -> impl Iterator<Item = Vec<u32>> {
    (0u32..(1 << count)).map(move |mask| (1..=count).filter(|i| mask & (1 << (i - 1)) != 0).collect())
}

#[test]
fn test_nine_sections_three_vertical_columns() {
    let columns = plan_columns(9, &[], 3, Orientation::Vertical);
    assert_eq!(columns, vec![1, 1, 1, 2, 2, 2, 3, 3, 3]);
}

#[test]
fn test_hidden_sections_keep_their_slot_in_vertical_breakpoints() {
    // Breakpoints use all 5 sections: 2.5 then 5.0 shown sections.
    let columns = plan_columns(5, &[2, 5], 2, Orientation::Vertical);
    assert_eq!(columns, vec![1, 1, 1, 1, 2]);
}

#[test]
fn test_requested_above_section_count_clamps_to_sections() {
    let outcome = clamp_columns(6, 4);
    assert_eq!(outcome.effective, 4);
    assert_eq!(outcome.bound, Some(ClampBound::SectionCount));
    assert!(outcome.out_of_range());

    let columns = plan_columns(4, &[], 6, Orientation::Vertical);
    assert_eq!(columns, vec![1, 2, 3, 4]);
}

#[test]
fn test_zero_columns_clamps_to_one() {
    let outcome = clamp_columns(0, 5);
    assert_eq!(outcome.effective, 1);
    assert_eq!(outcome.bound, Some(ClampBound::Minimum));
    assert_eq!(outcome.storable(), 1);
}

#[test]
fn test_horizontal_twelve_sections_three_columns() {
    let columns = plan_columns(12, &[], 3, Orientation::Horizontal);
    assert_eq!(columns, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 3, 3, 3]);
}

#[test]
fn test_clamp_is_idempotent() {
    for requested in -5..=10 {
        for sections in 1..=8 {
            let once = clamp_columns(requested, sections);
            let twice = clamp_columns(i64::from(once.effective), sections);
            assert_eq!(once.effective, twice.effective, "requested {requested}, {sections} sections");
        }
    }
}

#[test]
fn test_effective_columns_bounded() {
    for count in 1..=10 {
        for requested in -3..=8 {
            for orientation in [Orientation::Vertical, Orientation::Horizontal] {
                let outline = outline_with_hidden(1, count, &[]);
                let layout = plan_outline(&outline, LayoutConfig::new(requested, orientation), true, 1.0)
                    .unwrap();
                let effective = layout.effective_columns();
                assert!(effective >= 1);
                assert!(effective <= 4);
                assert!(effective <= count);
            }
        }
    }
}

#[test]
fn test_every_section_placed_once_in_order() {
    for count in 1..=7 {
        for hidden in hidden_patterns(count) {
            for requested in 1..=4 {
                for orientation in [Orientation::Vertical, Orientation::Horizontal] {
                    let outline = outline_with_hidden(1, count, &hidden);
                    let layout =
                        plan_outline(&outline, LayoutConfig::new(requested, orientation), false, 1.0)
                            .unwrap();
                    let effective = layout.effective_columns();

                    let indices: Vec<u32> = layout.placements.iter().map(|p| p.section).collect();
                    assert_eq!(indices, (1..=count).collect::<Vec<_>>());

                    for pair in layout.placements.windows(2) {
                        assert!(
                            pair[0].column <= pair[1].column,
                            "columns go backwards: {hidden:?} {requested} {orientation}"
                        );
                    }
                    for placement in &layout.placements {
                        assert!((1..=effective).contains(&placement.column));
                    }
                    assert!(layout.opened_columns <= effective);
                }
            }
        }
    }
}

#[test]
fn test_single_column_ignores_visibility() {
    for hidden in hidden_patterns(6) {
        let columns = plan_columns(6, &hidden, 1, Orientation::Vertical);
        assert!(columns.iter().all(|&c| c == 1), "{hidden:?}");
    }
}

#[test]
fn test_declared_count_separates_stealth_sections() {
    let outline = outline_mixed(3);
    let layout = plan_outline(&outline, LayoutConfig::new(2, Orientation::Vertical), false, 1.0)
        .unwrap();

    assert_eq!(layout.stealth, vec![7]);
    assert_eq!(layout.placements.len(), 6);
    let shown: Vec<u32> = layout
        .placements
        .iter()
        .filter(|p| p.shown)
        .map(|p| p.section)
        .collect();
    assert_eq!(shown, vec![1, 2, 3, 5]);
}

#[test]
fn test_general_only_course_is_empty() {
    let outline = outline_with_hidden(4, 0, &[]);
    let layout = plan_outline(&outline, LayoutConfig::new(3, Orientation::Horizontal), false, 1.0)
        .unwrap();
    assert!(layout.is_empty());
    assert_eq!(layout.opened_columns, 0);
    assert!(layout.columns().is_empty());
}

#[test]
fn test_widths_follow_orientation() {
    let sections: Vec<Section> = (1..=8).map(Section::new).collect();

    let vertical = ColumnLayoutPlanner::new(LayoutConfig::new(4, Orientation::Vertical))
        .plan(&sections)
        .unwrap();
    assert_eq!(vertical.width, ColumnWidth::Container(24.0));

    let responsive = ColumnLayoutPlanner::new(LayoutConfig::new(4, Orientation::Horizontal))
        .responsive(true)
        .plan(&sections)
        .unwrap();
    assert_eq!(responsive.width, ColumnWidth::PerSection(25.0));

    let bucketed = ColumnLayoutPlanner::new(LayoutConfig::new(3, Orientation::Horizontal))
        .plan(&sections)
        .unwrap();
    assert_eq!(bucketed.width.css_class().as_deref(), Some("cn-col-3"));
}

#[test]
fn test_layout_serializes_for_api_consumers() {
    let sections: Vec<Section> = (1..=3).map(Section::new).collect();
    let layout = ColumnLayoutPlanner::new(LayoutConfig::new(5, Orientation::Vertical))
        .plan(&sections)
        .unwrap();
    let json = serde_json::to_value(&layout).unwrap();

    assert_eq!(json["clamp"]["requested"], 5);
    assert_eq!(json["clamp"]["effective"], 3);
    assert_eq!(json["clamp"]["bound"], "section_count");
    assert_eq!(json["orientation"], "vertical");
    assert_eq!(json["width"]["mode"], "container");
    assert_eq!(json["placements"][2]["column"], 3);
}
