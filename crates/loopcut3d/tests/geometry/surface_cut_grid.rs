use approx::assert_relative_eq;
use loopcut3d::math::{Point3, Real};
use loopcut3d::shape::{Cell, SurfaceMesh};
use loopcut3d::transformation::{SurfaceCutParameters, SurfaceCutter};

/// A `n × n` grid of unit squares, each split into two triangles, on the plane `z = x/2 - y/4`.
fn grid(n: u32) -> SurfaceMesh {
    let mut points = Vec::new();
    let mut triangles = Vec::new();

    for j in 0..=n {
        for i in 0..=n {
            let (x, y) = (i as Real, j as Real);
            points.push(Point3::new(x, y, x / 2.0 - y / 4.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v = j * (n + 1) + i;
            triangles.push([v, v + 1, v + n + 2]);
            triangles.push([v, v + n + 2, v + n + 1]);
        }
    }

    SurfaceMesh::from_triangles(points, &triangles)
}

fn squares(squares: &[(Real, Real, Real, Real)]) -> SurfaceMesh {
    let mut points = Vec::new();
    let mut cells = Vec::new();

    for (k, (x0, y0, x1, y1)) in squares.iter().enumerate() {
        let base = 4 * k as u32;
        points.extend([
            Point3::new(*x0, *y0, 0.0),
            Point3::new(*x1, *y0, 0.0),
            Point3::new(*x1, *y1, 0.0),
            Point3::new(*x0, *y1, 0.0),
        ]);
        cells.push(Cell::Polygon(vec![base, base + 1, base + 2, base + 3]));
    }

    SurfaceMesh::new(points, cells)
}

fn cut(surface: &SurfaceMesh, loops: &SurfaceMesh, inside_out: bool, remove: bool) -> SurfaceMesh {
    let params = SurfaceCutParameters {
        inside_out,
        remove,
        ..SurfaceCutParameters::default()
    };
    SurfaceCutter::new(params).cut(surface, loops).unwrap().0
}

#[test]
fn cut_area_is_conserved() {
    let surface = grid(10);
    let loops = squares(&[(1.5, 1.5, 8.5, 8.5)]);

    let inside = cut(&surface, &loops, true, true);
    let outside = cut(&surface, &loops, false, true);
    let embedded = cut(&surface, &loops, true, false);

    assert_relative_eq!(inside.projected_area(), 49.0, epsilon = 1.0e-8);
    assert_relative_eq!(outside.projected_area(), 51.0, epsilon = 1.0e-8);
    assert_relative_eq!(embedded.projected_area(), 100.0, epsilon = 1.0e-8);

    // Both sides are complementary subsets of the embedded surface.
    assert_eq!(
        inside.cells().len() + outside.cells().len(),
        embedded.cells().len()
    );
    assert_eq!(inside.points(), embedded.points());
    assert_eq!(outside.points(), embedded.points());
    for cell in inside.cells().iter().chain(outside.cells()) {
        assert!(embedded.cells().contains(cell));
    }
}

#[test]
fn inserted_points_lie_on_the_surface() {
    let surface = grid(6);
    let loops = squares(&[(0.3, 0.7, 4.6, 3.2)]);
    let embedded = cut(&surface, &loops, true, false);

    assert!(embedded.points().len() > surface.points().len());
    assert_eq!(&embedded.points()[..surface.points().len()], surface.points());

    for pt in embedded.points() {
        assert_relative_eq!(pt.z, pt.x / 2.0 - pt.y / 4.0, epsilon = 1.0e-9);
    }
}

#[test]
fn nested_loops_are_merged() {
    let surface = grid(10);
    let loops = squares(&[(1.5, 1.5, 8.5, 8.5), (3.5, 3.5, 5.5, 5.5)]);

    assert_relative_eq!(
        cut(&surface, &loops, true, true).projected_area(),
        49.0,
        epsilon = 1.0e-8
    );
    assert_relative_eq!(
        cut(&surface, &loops, false, true).projected_area(),
        51.0,
        epsilon = 1.0e-8
    );
}

#[test]
fn overlapping_loops_are_merged() {
    let surface = grid(10);
    let loops = squares(&[(1.5, 1.5, 5.5, 5.5), (3.5, 3.5, 7.5, 7.5)]);

    let inside = cut(&surface, &loops, true, true);
    let outside = cut(&surface, &loops, false, true);

    assert_relative_eq!(inside.projected_area(), 28.0, epsilon = 1.0e-8);
    assert_relative_eq!(outside.projected_area(), 72.0, epsilon = 1.0e-8);
}

#[test]
fn loop_vertex_on_grid_vertex() {
    let surface = grid(4);
    // A diamond whose corners are grid vertices.
    let loops = SurfaceMesh::new(
        vec![
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(4.0, 2.0, 0.0),
            Point3::new(2.0, 4.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ],
        vec![Cell::Polygon(vec![0, 1, 2, 3])],
    );

    let (inside, stats) = SurfaceCutter::new(SurfaceCutParameters::default())
        .cut(&surface, &loops)
        .unwrap();

    assert_relative_eq!(inside.projected_area(), 8.0, epsilon = 1.0e-8);
    // Half of the diamond edges follow the triangle diagonals.
    assert!(stats.num_inserted_points > 0);
    for pt in &inside.points()[surface.points().len()..] {
        assert_relative_eq!((pt.x - 2.0).abs() + (pt.y - 2.0).abs(), 2.0, epsilon = 1.0e-9);
    }
}

#[test]
fn parallel_and_serial_cuts_are_identical() {
    let surface = grid(12);
    let loops = squares(&[
        (1.25, 2.75, 6.5, 9.1),
        (4.4, 0.6, 11.3, 5.2),
        (7.7, 7.7, 8.3, 8.3),
    ]);

    let parallel = SurfaceCutParameters::default();
    let serial = SurfaceCutParameters {
        accelerate_cell_locator: false,
        ..parallel
    };

    let (a, stats_a) = SurfaceCutter::new(parallel).cut(&surface, &loops).unwrap();
    let (b, stats_b) = SurfaceCutter::new(serial).cut(&surface, &loops).unwrap();

    assert_eq!(stats_a, stats_b);
    assert_eq!(a, b);
}
