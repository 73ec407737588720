use super::*;

fn square() -> Subpath {
    Subpath::closed_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 4.0),
        Point::new(0.0, 4.0),
    ])
}

fn default_style() -> Style {
    Style {
        fill: Paint::Color(Rgba::rgb(255, 0, 0)),
        fill_opacity: 1.0,
        stroke: Paint::None,
        stroke_width: 4.0,
        stroke_opacity: 1.0,
    }
}

#[test]
fn closed_polygon_shares_endpoints_and_closes() {
    let sp = square();
    assert!(sp.closed);
    assert_eq!(sp.segments.len(), 4);
    for pair in sp.segments.windows(2) {
        assert_eq!(pair[0].p3, pair[1].p0);
    }
    assert_eq!(sp.end(), sp.start());
}

#[test]
fn apply_affine_maps_all_control_points() {
    let mut sp = square();
    sp.apply_affine(Affine::translate((1.0, 2.0)));
    assert_eq!(sp.start().unwrap(), Point::new(1.0, 2.0));
    assert_eq!(sp.segments[0].p1, Point::new(1.0 + 4.0 / 3.0, 2.0));
    for pair in sp.segments.windows(2) {
        assert_eq!(pair[0].p3, pair[1].p0);
    }
}

#[test]
fn geometry_records_transform_composition() {
    let mut geometry = Geometry::new(vec![square()], default_style());
    geometry.apply_affine(Affine::scale(2.0));
    geometry.apply_affine(Affine::translate((1.0, 0.0)));

    // Points went through scale then translate; the record composes the same way.
    assert_eq!(
        geometry.transform,
        Affine::translate((1.0, 0.0)) * Affine::scale(2.0)
    );
    assert_eq!(
        geometry.subpaths[0].segments[0].p3,
        Point::new(4.0 * 2.0 + 1.0, 0.0)
    );
}

#[test]
fn node_leaves_walks_groups_depth_first() {
    let leaf_a = GeometryNode::Leaf(Geometry::new(vec![square()], default_style()));
    let mut style_b = default_style();
    style_b.fill = Paint::None;
    let leaf_b = GeometryNode::Leaf(Geometry::new(vec![], style_b));
    let group = GeometryNode::Group {
        children: vec![leaf_a, leaf_b],
        transform: Affine::IDENTITY,
    };

    let leaves = group.leaves();
    assert_eq!(leaves.len(), 2);
    assert_eq!(leaves[0].style.fill, Paint::Color(Rgba::rgb(255, 0, 0)));
    assert_eq!(leaves[1].style.fill, Paint::None);
}

#[test]
fn node_apply_affine_updates_group_record() {
    let mut node = GeometryNode::Group {
        children: vec![GeometryNode::Leaf(Geometry::new(
            vec![square()],
            default_style(),
        ))],
        transform: Affine::IDENTITY,
    };
    node.apply_affine(Affine::translate((3.0, 0.0)));

    let GeometryNode::Group {
        children,
        transform,
    } = &node
    else {
        panic!("expected group");
    };
    assert_eq!(*transform, Affine::translate((3.0, 0.0)));
    let GeometryNode::Leaf(geometry) = &children[0] else {
        panic!("expected leaf");
    };
    assert_eq!(geometry.subpaths[0].start().unwrap(), Point::new(3.0, 0.0));
}

#[test]
fn subpath_serde_round_trip() {
    let sp = square();
    let json = serde_json::to_string(&sp).unwrap();
    let back: Subpath = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sp);
}
