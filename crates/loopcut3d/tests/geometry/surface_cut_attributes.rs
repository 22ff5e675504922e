use approx::assert_relative_eq;
use loopcut3d::math::{Point2, Point3, Real};
use loopcut3d::shape::{AttributeArray, Attributes, Cell, SurfaceMesh};
use loopcut3d::transformation::{SurfaceCutParameters, SurfaceCutter};

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

fn in_triangle(pt: Point2<Real>, tri: [Point2<Real>; 3]) -> bool {
    let side = |a: Point2<Real>, b: Point2<Real>| (b - a).perp(&(pt - a)) >= -1.0e-9;
    side(tri[0], tri[1]) && side(tri[1], tri[2]) && side(tri[2], tri[0])
}

#[test]
fn point_attributes_are_interpolated() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 4.0),
        Point3::new(4.0, 4.0, 12.0),
        Point3::new(0.0, 4.0, 8.0),
    ];
    // A linear field, and a two-components field.
    let height: Vec<Real> = points.iter().map(|p| p.z).collect();
    let xy: Vec<Real> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let surface = SurfaceMesh::from_triangles(points, &[[0, 1, 2], [0, 2, 3]]).with_point_data(
        Attributes::new()
            .with(AttributeArray::new("height", 1, height))
            .with(AttributeArray::new("xy", 2, xy)),
    );

    let params = SurfaceCutParameters {
        remove: false,
        ..SurfaceCutParameters::default()
    };
    let (cut, stats) = SurfaceCutter::new(params)
        .cut(&surface, &square_loop(1.0, 2.5))
        .unwrap();

    assert!(stats.num_inserted_points > 0);
    let height = cut.point_data().get("height").unwrap();
    let xy = cut.point_data().get("xy").unwrap();
    assert_eq!(height.len(), cut.points().len());
    assert_eq!(xy.len(), cut.points().len());

    for (i, pt) in cut.points().iter().enumerate() {
        assert_relative_eq!(height.tuple(i)[0], pt.z, epsilon = 1.0e-9);
        assert_relative_eq!(xy.tuple(i)[0], pt.x, epsilon = 1.0e-9);
        assert_relative_eq!(xy.tuple(i)[1], pt.y, epsilon = 1.0e-9);
    }
}

#[test]
fn cell_attributes_are_copied_from_parents() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(4.0, 4.0, 0.0),
        Point3::new(0.0, 4.0, 0.0),
    ];
    let parents = [[0, 1, 2], [0, 2, 3]];
    let surface = SurfaceMesh::from_triangles(points, &parents)
        .with_cell_data(Attributes::new().with(AttributeArray::new("id", 1, vec![10.0, 20.0])));

    let (cut, _) = SurfaceCutter::new(SurfaceCutParameters::default())
        .cut(&surface, &square_loop(1.0, 3.0))
        .unwrap();

    let ids = cut.cell_data().get("id").unwrap();
    assert_eq!(ids.len(), cut.cells().len());
    assert_relative_eq!(cut.projected_area(), 4.0, epsilon = 1.0e-9);

    for (k, tri) in cut.triangles().enumerate() {
        let parent = parents[if ids.tuple(k)[0] == 10.0 { 0 } else { 1 }];
        let parent_xy = parent.map(|i| surface.point_xy(i));
        let [a, b, c] = tri.map(|i| cut.point_xy(i));
        let centroid = Point2::from((a.coords + b.coords + c.coords) / 3.0);
        assert!(in_triangle(centroid, parent_xy));
    }
}

#[test]
fn lines_are_split_but_never_removed() {
    let surface = SurfaceMesh::new(
        vec![
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(4.0, 2.0, 4.0),
            Point3::new(5.0, 5.0, 0.0),
            Point3::new(6.0, 5.0, 0.0),
        ],
        vec![Cell::Line(vec![0, 1]), Cell::Line(vec![2, 3])],
    )
    .with_cell_data(Attributes::new().with(AttributeArray::new("id", 1, vec![1.0, 2.0])));

    let (cut, stats) = SurfaceCutter::new(SurfaceCutParameters::default())
        .cut(&surface, &square_loop(1.0, 3.0))
        .unwrap();

    assert_eq!(stats.num_inserted_points, 2);
    assert_eq!(stats.num_split_cells, 1);
    assert_eq!(stats.num_removed_cells, 0);
    assert_eq!(cut.cells().len(), 4);

    let new_ids: Vec<u32> = (4..6)
        .filter(|i| cut.points()[*i as usize].x < 2.0)
        .chain((4..6).filter(|i| cut.points()[*i as usize].x > 2.0))
        .collect();
    assert_eq!(
        &cut.cells()[..3],
        &[
            Cell::Line(vec![0, new_ids[0]]),
            Cell::Line(vec![new_ids[0], new_ids[1]]),
            Cell::Line(vec![new_ids[1], 1]),
        ]
    );
    assert_eq!(cut.cells()[3], Cell::Line(vec![2, 3]));
    assert_eq!(cut.cell_data().get("id").unwrap().values(), &[1.0, 1.0, 1.0, 2.0]);

    // The z of the inserted points is interpolated along the line.
    for pt in &cut.points()[4..] {
        assert_relative_eq!(pt.z, pt.x, epsilon = 1.0e-9);
    }
}
