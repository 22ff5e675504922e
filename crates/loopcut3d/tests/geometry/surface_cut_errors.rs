use loopcut3d::math::Point3;
use loopcut3d::partitioning::{CellLocator, MergePoints};
use loopcut3d::shape::{AttributeArray, Attributes, Cell, SurfaceMesh, SurfaceMeshError};
use loopcut3d::transformation::{cut_surface, SurfaceCutError, SurfaceCutParameters, SurfaceCutter};

fn triangle() -> SurfaceMesh {
    SurfaceMesh::from_triangles(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        &[[0, 1, 2]],
    )
}

#[test]
fn empty_inputs_are_rejected() {
    let params = SurfaceCutParameters::default();

    assert_eq!(
        cut_surface(&SurfaceMesh::default(), &triangle(), &params),
        Err(SurfaceCutError::MissingSurfacePoints)
    );
    assert_eq!(
        cut_surface(&triangle(), &SurfaceMesh::default(), &params),
        Err(SurfaceCutError::MissingLoopPoints)
    );
}

#[test]
fn bad_tolerances_are_rejected() {
    for tolerance in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let params = SurfaceCutParameters {
            tolerance,
            ..SurfaceCutParameters::default()
        };

        assert!(matches!(
            cut_surface(&triangle(), &triangle(), &params),
            Err(SurfaceCutError::InvalidTolerance(_))
        ));
    }
}

#[test]
fn malformed_meshes_are_rejected() {
    let params = SurfaceCutParameters::default();
    let bad_loops = SurfaceMesh::new(
        vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
        vec![Cell::Polygon(vec![0, 1, 7])],
    );

    assert_eq!(
        cut_surface(&triangle(), &bad_loops, &params),
        Err(SurfaceCutError::InvalidMesh(
            SurfaceMeshError::PointIndexOutOfBounds { cell: 0, point: 7 }
        ))
    );

    let bad_surface = triangle()
        .with_point_data(Attributes::new().with(AttributeArray::new("h", 1, vec![0.0])));
    let err = cut_surface(&bad_surface, &triangle(), &params).unwrap_err();
    assert!(matches!(
        err,
        SurfaceCutError::InvalidMesh(SurfaceMeshError::AttributeSizeMismatch {
            expected: 3,
            found: 1,
            ..
        })
    ));
    assert!(err.to_string().contains("`h`"));
}

#[test]
fn point_merger_must_hold_the_surface_points() {
    let surface = triangle();
    let cutter = SurfaceCutter::new(SurfaceCutParameters::default());
    let locator = CellLocator::new(&surface, 1.0e-6);

    assert_eq!(
        cutter.cut_with(&surface, &triangle(), &locator, MergePoints::new(1.0e-6)),
        Err(SurfaceCutError::PointMergerMismatch {
            expected: 3,
            found: 0
        })
    );
}
