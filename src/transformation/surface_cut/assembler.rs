use super::loop_classifier::LoopClassifier;
use super::splitter::SplitOutput;
use crate::math::{Point2, Real};
use crate::shape::{Cell, SurfaceMesh};

/// Which cells of the split surface end up in the output.
#[derive(Copy, Clone, Debug)]
pub struct RemovalPolicy {
    /// Remove the cells on one side of the loops.
    pub remove: bool,
    /// Keep the cells inside of the loops (instead of outside) when removing.
    pub inside_out: bool,
}

impl RemovalPolicy {
    fn keeps(&self, classifier: &LoopClassifier, centroid: &Point2<Real>) -> bool {
        !self.remove || classifier.keeps(centroid, self.inside_out)
    }
}

/// Builds the output mesh from the split cells of `surface`.
///
/// Every split cell is replaced by its children, and triangles are filtered by `policy`. Lines
/// and polygons are always kept. Inserted points get their attributes interpolated from the
/// points of their parent cell, and every output cell copies the attributes of its parent.
///
/// Returns the output mesh and the number of removed cells.
pub fn assemble(
    surface: &SurfaceMesh,
    split: SplitOutput,
    classifier: &LoopClassifier,
    policy: RemovalPolicy,
) -> (SurfaceMesh, usize) {
    let SplitOutput {
        parents,
        points,
        new_point_weights,
        ..
    } = split;

    let mut point_data = surface.point_data().clone();
    for weights in &new_point_weights {
        point_data.push_interpolated(surface.point_data(), weights);
    }

    let mut cells = Vec::with_capacity(surface.cells().len());
    let mut cell_data = surface.cell_data().empty_like(surface.cells().len());
    let mut num_removed = 0;

    let mut emit = |cell: Cell, parent_id: u32| {
        cells.push(cell);
        cell_data.push_copy(surface.cell_data(), parent_id);
    };

    for parent in &parents {
        let cell = &surface.cells()[parent.cell_id as usize];

        match cell {
            Cell::Polygon(_) => emit(cell.clone(), parent.cell_id),
            Cell::Line(_) if parent.is_split() => {
                for child in &parent.children {
                    emit(Cell::Line(child.point_ids.to_vec()), parent.cell_id);
                }
            }
            Cell::Line(_) => emit(cell.clone(), parent.cell_id),
            Cell::Triangle(_) if parent.is_split() => {
                for child in &parent.children {
                    if policy.keeps(classifier, &child.centroid) {
                        let ids = [child.point_ids[0], child.point_ids[1], child.point_ids[2]];
                        emit(Cell::Triangle(ids), parent.cell_id);
                    } else {
                        num_removed += 1;
                    }
                }
            }
            Cell::Triangle(ids) => {
                let centroid = ids
                    .iter()
                    .fold(Point2::origin(), |acc, id| acc + surface.point_xy(*id).coords)
                    / 3.0;

                if policy.keeps(classifier, &centroid) {
                    emit(cell.clone(), parent.cell_id);
                } else {
                    num_removed += 1;
                }
            }
        }
    }

    log::debug!(
        "Assembled {} cells ({} removed) over {} points.",
        cells.len(),
        num_removed,
        points.len()
    );

    let mesh = SurfaceMesh::new(points, cells)
        .with_point_data(point_data)
        .with_cell_data(cell_data);

    (mesh, num_removed)
}
