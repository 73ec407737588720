use super::*;

use crate::foundation::core::Rgba;
use crate::foundation::error::CubistError;

const RED: Paint = Paint::Color(Rgba::rgb(255, 0, 0));
const BLUE: Paint = Paint::Color(Rgba::rgb(0, 0, 255));

#[test]
fn set_properties_win_over_inherited() {
    let inherited = StyleAttrs {
        fill: Some(BLUE),
        stroke_width: Some(2.0),
        ..StyleAttrs::default()
    };
    let own = StyleAttrs {
        fill: Some(RED),
        stroke_opacity: Some(0.5),
        ..StyleAttrs::default()
    };

    let merged = own.or(inherited);
    assert_eq!(merged.fill, Some(RED));
    assert_eq!(merged.stroke_width, Some(2.0));
    assert_eq!(merged.stroke_opacity, Some(0.5));
    assert_eq!(merged.fill_opacity, None);
}

#[test]
fn resolve_falls_back_to_defaults() {
    let style = StyleAttrs::default().resolve(&StyleDefaults::default());
    assert_eq!(style.fill, Paint::None);
    assert_eq!(style.fill_opacity, 1.0);
    assert_eq!(style.stroke, Paint::None);
    assert_eq!(style.stroke_width, 4.0);
    assert_eq!(style.stroke_opacity, 1.0);

    let attrs = StyleAttrs {
        stroke: Some(RED),
        ..StyleAttrs::default()
    };
    let style = attrs.resolve(&StyleDefaults::default());
    assert_eq!(style.stroke, RED);
    assert_eq!(style.stroke_width, 4.0);
}

#[test]
fn apply_property_ignores_unrelated_names() {
    let mut attrs = StyleAttrs::default();
    attrs.apply_property("d", "M0,0 L1,1").unwrap();
    attrs.apply_property("transform", "scale(2)").unwrap();
    attrs.apply_property("font-size", "12").unwrap();
    assert_eq!(attrs, StyleAttrs::default());
}

#[test]
fn apply_property_parses_each_styled_name() {
    let mut attrs = StyleAttrs::default();
    attrs.apply_property("fill", "red").unwrap();
    attrs.apply_property("fill-opacity", "0.25").unwrap();
    attrs.apply_property("stroke", "none").unwrap();
    attrs.apply_property("stroke-width", "1.5").unwrap();
    attrs.apply_property("stroke-opacity", "0.75").unwrap();

    assert_eq!(attrs.fill, Some(RED));
    assert_eq!(attrs.fill_opacity, Some(0.25));
    assert_eq!(attrs.stroke, Some(Paint::None));
    assert_eq!(attrs.stroke_width, Some(1.5));
    assert_eq!(attrs.stroke_opacity, Some(0.75));
}

#[test]
fn opacity_is_clamped_to_unit_range() {
    let mut attrs = StyleAttrs::default();
    attrs.apply_property("fill-opacity", "2.5").unwrap();
    assert_eq!(attrs.fill_opacity, Some(1.0));
    attrs.apply_property("stroke-opacity", "-1").unwrap();
    assert_eq!(attrs.stroke_opacity, Some(0.0));
}

#[test]
fn stroke_width_none_and_empty_mean_zero() {
    let mut attrs = StyleAttrs::default();
    attrs.apply_property("stroke-width", "none").unwrap();
    assert_eq!(attrs.stroke_width, Some(0.0));
    attrs.apply_property("stroke-width", "").unwrap();
    assert_eq!(attrs.stroke_width, Some(0.0));
    assert!(matches!(
        attrs.apply_property("stroke-width", "wide"),
        Err(CubistError::Style(_))
    ));
}

#[test]
fn malformed_values_error() {
    let mut attrs = StyleAttrs::default();
    assert!(matches!(
        attrs.apply_property("fill", "blurple"),
        Err(CubistError::Style(_))
    ));
    assert!(matches!(
        attrs.apply_property("fill-opacity", "opaque"),
        Err(CubistError::Style(_))
    ));
}

#[test]
fn style_decls_later_declaration_wins() {
    let mut attrs = StyleAttrs::default();
    attrs
        .apply_style_decls("fill: blue; stroke-width: 2; fill: red;")
        .unwrap();
    assert_eq!(attrs.fill, Some(RED));
    assert_eq!(attrs.stroke_width, Some(2.0));
}

#[test]
fn style_decls_skip_empty_segments() {
    let mut attrs = StyleAttrs::default();
    attrs.apply_style_decls(";; fill: red ;;").unwrap();
    assert_eq!(attrs.fill, Some(RED));
}

#[test]
fn style_decl_without_colon_errors() {
    let mut attrs = StyleAttrs::default();
    assert!(matches!(
        attrs.apply_style_decls("fill red"),
        Err(CubistError::Style(_))
    ));
}

#[test]
fn from_element_reads_presentation_attributes() {
    let doc =
        roxmltree::Document::parse(r#"<path d="M0,0" fill="red" stroke-width="2"/>"#).unwrap();
    let attrs = StyleAttrs::from_element(doc.root_element()).unwrap();
    assert_eq!(attrs.fill, Some(RED));
    assert_eq!(attrs.stroke_width, Some(2.0));
    assert_eq!(attrs.stroke, None);
}

#[test]
fn inline_style_wins_over_presentation_attributes() {
    let doc = roxmltree::Document::parse(
        r#"<rect fill="blue" style="fill: red" stroke="blue" width="1" height="1"/>"#,
    )
    .unwrap();
    let attrs = StyleAttrs::from_element(doc.root_element()).unwrap();
    assert_eq!(attrs.fill, Some(RED));
    assert_eq!(attrs.stroke, Some(BLUE));
}

#[test]
fn definition_style_wins_over_use_site() {
    let def_site = StyleAttrs {
        fill: Some(RED),
        ..StyleAttrs::default()
    };
    let use_site = StyleAttrs {
        fill: Some(BLUE),
        stroke: Some(BLUE),
        ..StyleAttrs::default()
    };

    let merged = def_site.or(use_site);
    assert_eq!(merged.fill, Some(RED));
    assert_eq!(merged.stroke, Some(BLUE));
}
