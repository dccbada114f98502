//! Property tests for the shape-editing invariants.

use approx::assert_relative_eq;
use carvekit_designer::{Leaf, MirrorAxis, Point, Shape, TriArc};
use proptest::prelude::*;

fn point_strategy() -> impl Strategy<Value = Point> {
    (-500.0..500.0f64, -500.0..500.0f64).prop_map(|(x, y)| Point::new(x, y))
}

fn triangle_area(vertices: &[Point; 3]) -> f64 {
    let [a, b, c] = vertices;
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
}

fn tri_arc_strategy() -> impl Strategy<Value = TriArc> {
    [point_strategy(), point_strategy(), point_strategy()]
        .prop_filter("triangle too thin", |vs| triangle_area(vs) > 100.0)
        .prop_map(TriArc::new)
}

fn leaf_strategy() -> impl Strategy<Value = Leaf> {
    (point_strategy(), point_strategy())
        .prop_filter("foci too close", |(a, b)| a.distance_to(b) > 1.0)
        .prop_map(|(a, b)| Leaf::from_placement(a, b))
}

/// One interactive edit applied to a tri-arc.
#[derive(Debug, Clone)]
enum Edit {
    MoveVertex(usize, Point),
    MoveArc(usize, f64),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0..3usize, point_strategy()).prop_map(|(i, p)| Edit::MoveVertex(i, p)),
        (0..3usize, -50.0..500.0f64).prop_map(|(i, o)| Edit::MoveArc(i, o)),
    ]
}

proptest! {
    /// Every bulge stays in the valid concave range under any sequence of
    /// vertex and arc edits.
    #[test]
    fn concavity_invariant_survives_edits(
        mut tri in tri_arc_strategy(),
        edits in prop::collection::vec(edit_strategy(), 1..24),
    ) {
        for edit in edits {
            match edit {
                Edit::MoveVertex(index, position) => tri.move_vertex(index, position),
                Edit::MoveArc(index, offset) => tri.move_arc(index, offset),
            }
            for bulge in tri.curvatures {
                prop_assert!(bulge > -0.99);
                prop_assert!(bulge <= -0.01);
            }
        }
    }

    /// Rotating by an angle and then its negation about the same center
    /// restores the vertices.
    #[test]
    fn rotation_is_an_isometry(
        tri in tri_arc_strategy(),
        angle in -3.1f64..3.1,
        center in point_strategy(),
    ) {
        let mut shape = Shape::TriArc(tri);
        let original = shape.vertices().to_vec();
        shape.rotate(angle, Some(center));
        shape.rotate(-angle, Some(center));
        for (v, o) in shape.vertices().iter().zip(original.iter()) {
            prop_assert!((v.x - o.x).abs() < 1e-6);
            prop_assert!((v.y - o.y).abs() < 1e-6);
        }
    }

    /// Mirroring twice across the same axis and center restores the
    /// vertices exactly.
    #[test]
    fn mirror_is_involutive(
        leaf in leaf_strategy(),
        center in point_strategy(),
        horizontal in any::<bool>(),
    ) {
        let axis = if horizontal {
            MirrorAxis::Horizontal
        } else {
            MirrorAxis::Vertical
        };
        let mut shape = Shape::Leaf(leaf);
        let original = shape.vertices().to_vec();
        shape.mirror(axis, center);
        shape.mirror(axis, center);
        for (v, o) in shape.vertices().iter().zip(original.iter()) {
            prop_assert!((v.x - o.x).abs() < 1e-9);
            prop_assert!((v.y - o.y).abs() < 1e-9);
        }
    }

    /// Serialization round trip preserves vertices and curvature values.
    #[test]
    fn serde_round_trip_is_identity(tri in tri_arc_strategy(), leaf in leaf_strategy()) {
        use carvekit_designer::ShapeData;
        for shape in [Shape::TriArc(tri), Shape::Leaf(leaf)] {
            let restored = ShapeData::from_shape(&shape).to_shape().unwrap();
            prop_assert_eq!(&shape, &restored);
        }
    }
}

#[test]
fn mirror_after_rotate_keeps_tri_arc_concave() {
    // The winding-order subtlety: rotate, mirror, then check every arc
    // still dips toward the centroid with its original depth.
    let mut tri = TriArc::new([
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(50.0, 100.0),
    ]);
    let depths: Vec<f64> = (0..3).map(|i| tri.sagitta(i).abs()).collect();
    tri.rotate(0.6, Point::new(25.0, 25.0));
    tri.mirror(MirrorAxis::Horizontal, Point::new(0.0, 0.0));
    for i in 0..3 {
        assert_relative_eq!(tri.sagitta(i).abs(), depths[i], epsilon = 1e-9);
        let centroid = tri.center();
        let mid = tri.vertices[i].midpoint(&tri.vertices[(i + 1) % 3]);
        let handle = tri.arc_midpoint(i);
        assert!(handle.distance_to(&centroid) < mid.distance_to(&centroid));
    }
}
