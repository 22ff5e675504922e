use super::SurfaceMeshError;
use crate::math::Real;

/// A named array of per-point or per-cell values.
///
/// The array stores `num_components` values per tuple, flattened in a single buffer. Tuple `i`
/// is associated to the point (or cell) with id `i`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct AttributeArray {
    name: String,
    num_components: usize,
    values: Vec<Real>,
}

impl AttributeArray {
    /// Creates a new attribute array from its flattened values.
    ///
    /// `values.len()` is expected to be a multiple of `num_components`. This is checked by
    /// [`SurfaceMesh::validate`](crate::shape::SurfaceMesh::validate).
    pub fn new(name: impl Into<String>, num_components: usize, values: Vec<Real>) -> Self {
        Self {
            name: name.into(),
            num_components,
            values,
        }
    }

    /// Creates an empty array with the same name and number of components as `self`.
    pub fn empty_like(&self, capacity: usize) -> Self {
        Self {
            name: self.name.clone(),
            num_components: self.num_components,
            values: Vec::with_capacity(capacity * self.num_components),
        }
    }

    /// The name of this array.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of components of each tuple.
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// The flattened values of this array.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// The number of tuples of this array.
    pub fn len(&self) -> usize {
        if self.num_components == 0 {
            0
        } else {
            self.values.len() / self.num_components
        }
    }

    /// Is this array empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th tuple of this array.
    pub fn tuple(&self, i: usize) -> &[Real] {
        &self.values[i * self.num_components..(i + 1) * self.num_components]
    }

    /// Appends a tuple at the end of this array.
    pub fn push_tuple(&mut self, tuple: &[Real]) {
        assert_eq!(tuple.len(), self.num_components);
        self.values.extend_from_slice(tuple);
    }

    /// Appends the weighted sum of tuples of `src` at the end of this array.
    ///
    /// Each weight is given as `(tuple id in src, weight)`.
    pub fn push_interpolated(&mut self, src: &AttributeArray, weights: &[(u32, Real)]) {
        let start = self.values.len();
        self.values.resize(start + self.num_components, 0.0);
        let dst = &mut self.values[start..];

        for (id, weight) in weights {
            for (d, s) in dst.iter_mut().zip(src.tuple(*id as usize)) {
                *d += *s * *weight;
            }
        }
    }
}

/// A set of named attribute arrays attached to the points or cells of a mesh.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Attributes {
    arrays: Vec<AttributeArray>,
}

impl Attributes {
    /// An empty set of attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an array to this set, replacing any array with the same name.
    pub fn insert(&mut self, array: AttributeArray) {
        if let Some(existing) = self.arrays.iter_mut().find(|a| a.name == array.name) {
            *existing = array;
        } else {
            self.arrays.push(array);
        }
    }

    /// Adds an array to this set.
    pub fn with(mut self, array: AttributeArray) -> Self {
        self.insert(array);
        self
    }

    /// The array with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&AttributeArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    /// Iterates through all the arrays of this set.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeArray> {
        self.arrays.iter()
    }

    /// The number of arrays in this set.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Does this set contain no array?
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Creates a set of empty arrays with the same layout as `self`.
    pub fn empty_like(&self, capacity: usize) -> Self {
        Self {
            arrays: self.arrays.iter().map(|a| a.empty_like(capacity)).collect(),
        }
    }

    /// Appends, to every array, a copy of the tuple `id` of the corresponding array of `src`.
    ///
    /// `self` must have been created with `src.empty_like(..)`.
    pub fn push_copy(&mut self, src: &Attributes, id: u32) {
        for (dst, src) in self.arrays.iter_mut().zip(src.arrays.iter()) {
            dst.push_tuple(src.tuple(id as usize));
        }
    }

    /// Appends, to every array, an interpolation of tuples of the corresponding array of `src`.
    ///
    /// `self` must have been created with `src.empty_like(..)`.
    pub fn push_interpolated(&mut self, src: &Attributes, weights: &[(u32, Real)]) {
        for (dst, src) in self.arrays.iter_mut().zip(src.arrays.iter()) {
            dst.push_interpolated(src, weights);
        }
    }

    /// Checks that every array has exactly `expected_len` tuples.
    pub fn validate(&self, expected_len: usize) -> Result<(), SurfaceMeshError> {
        for array in &self.arrays {
            let expected = expected_len * array.num_components;

            if array.num_components == 0 || array.values.len() != expected {
                return Err(SurfaceMeshError::AttributeSizeMismatch {
                    name: array.name.clone(),
                    expected,
                    found: array.values.len(),
                });
            }
        }

        Ok(())
    }
}
