use approx::assert_relative_eq;
use loopcut3d::math::{Point2, Point3, Real};
use loopcut3d::partitioning::{CellLocator, MergePoints};
use loopcut3d::shape::{Cell, SurfaceMesh};
use loopcut3d::transformation::surface_cut::{extract_loops, LoopClassifier};
use loopcut3d::transformation::{SurfaceCutParameters, SurfaceCutter};

const TOLERANCE: Real = 1.0e-6;

fn big_triangle() -> SurfaceMesh {
    SurfaceMesh::from_triangles(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ],
        &[[0, 1, 2]],
    )
}

fn square_loop(min: Real, max: Real) -> SurfaceMesh {
    SurfaceMesh::new(
        vec![
            Point3::new(min, min, 0.0),
            Point3::new(max, min, 0.0),
            Point3::new(max, max, 0.0),
            Point3::new(min, max, 0.0),
        ],
        vec![Cell::Polygon(vec![0, 1, 2, 3])],
    )
}

fn centroid(mesh: &SurfaceMesh, tri: [u32; 3]) -> Point2<Real> {
    let [a, b, c] = tri.map(|i| mesh.point_xy(i));
    Point2::from((a.coords + b.coords + c.coords) / 3.0)
}

#[test]
fn square_cut_keeps_the_inside() {
    let loops = square_loop(1.0, 3.0);
    let cutter = SurfaceCutter::new(SurfaceCutParameters::default());
    let (cut, stats) = cutter.cut(&big_triangle(), &loops).unwrap();

    assert_eq!(stats.num_loops, 1);
    assert_eq!(stats.num_split_cells, 1);
    // (1, 1) is inside of the triangle, (3, 1) and (1, 3) are on its hypotenuse.
    assert_eq!(stats.num_inserted_points, 3);
    assert_eq!(cut.points().len(), 6);
    assert_relative_eq!(cut.projected_area(), 2.0, epsilon = 1.0e-9);

    let classifier = LoopClassifier::new(extract_loops(&loops, TOLERANCE));
    assert!(!cut.cells().is_empty());
    for tri in cut.triangles() {
        assert_eq!(classifier.inside_count(&centroid(&cut, tri)), 1);
    }
}

#[test]
fn square_cut_keeps_the_outside() {
    let params = SurfaceCutParameters {
        inside_out: false,
        ..SurfaceCutParameters::default()
    };
    let loops = square_loop(1.0, 3.0);
    let (cut, stats) = SurfaceCutter::new(params)
        .cut(&big_triangle(), &loops)
        .unwrap();

    assert_eq!(stats.num_inserted_points, 3);
    assert!(stats.num_removed_cells > 0);
    assert_relative_eq!(cut.projected_area(), 6.0, epsilon = 1.0e-9);

    let classifier = LoopClassifier::new(extract_loops(&loops, TOLERANCE));
    for tri in cut.triangles() {
        assert_eq!(classifier.inside_count(&centroid(&cut, tri)), 0);
    }
}

#[test]
fn embedding_only_keeps_everything() {
    let params = SurfaceCutParameters {
        remove: false,
        ..SurfaceCutParameters::default()
    };
    let surface = big_triangle();
    let (cut, stats) = SurfaceCutter::new(params)
        .cut(&surface, &square_loop(1.0, 3.0))
        .unwrap();

    assert_eq!(stats.num_removed_cells, 0);
    assert!(cut.cells().len() > surface.cells().len());
    assert_eq!(&cut.points()[..3], surface.points());
    assert_relative_eq!(cut.projected_area(), 8.0, epsilon = 1.0e-9);

    // Every inserted point lies on the loop or on the triangle boundary.
    for pt in &cut.points()[3..] {
        let on_square = (pt.x - 1.0).abs() < 1.0e-9
            || (pt.x - 3.0).abs() < 1.0e-9
            || (pt.y - 1.0).abs() < 1.0e-9
            || (pt.y - 3.0).abs() < 1.0e-9;
        assert!(on_square, "{pt:?}");
    }
}

#[test]
fn loop_along_existing_edges_inserts_nothing() {
    let surface = SurfaceMesh::from_triangles(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ],
        &[[0, 1, 2], [0, 2, 3]],
    );
    // The loop follows the boundary of the first triangle.
    let loops = SurfaceMesh::new(
        vec![
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(2.0, 0.0, 5.0),
            Point3::new(2.0, 2.0, 5.0),
        ],
        vec![Cell::Polygon(vec![0, 1, 2])],
    );

    let (cut, stats) = SurfaceCutter::new(SurfaceCutParameters::default())
        .cut(&surface, &loops)
        .unwrap();

    assert_eq!(stats.num_inserted_points, 0);
    assert_eq!(stats.num_split_cells, 0);
    assert_eq!(stats.num_removed_cells, 1);
    assert_eq!(cut.points(), surface.points());
    assert_eq!(cut.cells(), &[Cell::Triangle([0, 1, 2])]);
}

#[test]
fn removal_without_embedding_drops_whole_cells() {
    let params = SurfaceCutParameters {
        embed: false,
        ..SurfaceCutParameters::default()
    };
    let surface = SurfaceMesh::from_triangles(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ],
        &[[0, 1, 2], [0, 2, 3]],
    );
    // Contains the centroid of the first triangle only.
    let loops = SurfaceMesh::new(
        vec![
            Point3::new(1.2, 0.5, 0.0),
            Point3::new(1.5, 0.5, 0.0),
            Point3::new(1.5, 0.8, 0.0),
            Point3::new(1.2, 0.8, 0.0),
        ],
        vec![Cell::Polygon(vec![0, 1, 2, 3])],
    );

    let (cut, stats) = SurfaceCutter::new(params).cut(&surface, &loops).unwrap();
    assert_eq!(stats.num_inserted_points, 0);
    assert_eq!(stats.num_removed_cells, 1);
    assert_eq!(cut.cells(), &[Cell::Triangle([0, 1, 2])]);
}

#[test]
fn no_embedding_and_no_removal_is_a_no_op() {
    let params = SurfaceCutParameters {
        embed: false,
        remove: false,
        ..SurfaceCutParameters::default()
    };
    let surface = big_triangle();
    let (cut, stats) = SurfaceCutter::new(params)
        .cut(&surface, &square_loop(1.0, 3.0))
        .unwrap();

    assert_eq!(cut, surface);
    assert_eq!(stats.num_loops, 1);
    assert_eq!(stats.num_removed_cells, 0);
}

#[test]
fn far_away_loop_leaves_the_surface_intact() {
    let params = SurfaceCutParameters {
        inside_out: false,
        ..SurfaceCutParameters::default()
    };
    let surface = big_triangle();
    let (cut, stats) = SurfaceCutter::new(params)
        .cut(&surface, &square_loop(10.0, 12.0))
        .unwrap();

    assert_eq!(stats.num_candidates, 0);
    assert_eq!(cut, surface);
}

#[test]
fn sliver_triangles_pass_through() {
    let surface = SurfaceMesh::from_triangles(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(8.0, 0.0, 0.0),
            Point3::new(4.0, 1.0e-9, 0.0),
            Point3::new(4.0, -4.0, 0.0),
        ],
        // A sliver above the x axis, and a regular triangle below it.
        &[[0, 1, 2], [0, 3, 1]],
    );
    let loops = SurfaceMesh::new(
        vec![
            Point3::new(2.0, -2.0, 0.0),
            Point3::new(6.0, -2.0, 0.0),
            Point3::new(6.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ],
        vec![Cell::Polygon(vec![0, 1, 2, 3])],
    );
    let params = SurfaceCutParameters {
        remove: false,
        ..SurfaceCutParameters::default()
    };

    let (cut, stats) = SurfaceCutter::new(params).cut(&surface, &loops).unwrap();

    assert_eq!(stats.num_degenerate_cells, 1);
    assert_eq!(stats.num_split_cells, 1);
    assert_eq!(cut.cells()[0], Cell::Triangle([0, 1, 2]));
    assert!(cut.cells().len() > 2);
    assert_relative_eq!(cut.projected_area(), 16.0, epsilon = 1.0e-6);
}

#[test]
fn explicit_default_locators() {
    let surface = big_triangle();
    let loops = square_loop(1.0, 3.0);
    let cutter = SurfaceCutter::new(SurfaceCutParameters::default());

    let expected = cutter.cut(&surface, &loops).unwrap();
    let result = cutter
        .cut_with(
            &surface,
            &loops,
            CellLocator::new(&surface, TOLERANCE),
            MergePoints::seeded(surface.points(), TOLERANCE),
        )
        .unwrap();

    assert_eq!(result, expected);
}
