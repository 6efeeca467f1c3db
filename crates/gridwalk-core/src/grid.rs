//! A dense, row-major grid of `Copy` cell values.
//!
//! [`Grid<bool>`] is the walkability map consumed by the pathfinder, and the
//! maze generator stores its wall masks in a [`Grid`] too. The grid is always
//! anchored at the origin: its bounds are `[0, width) × [0, height)`.

use crate::geom::{Point, Range};

/// A `width × height` grid of `T` values.
///
/// With the `serde` feature, deserializing checks that the cell count
/// matches the dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a new grid filled with `T::default()`.
    ///
    /// Negative dimensions are clamped to zero, giving an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Create a new grid with every cell set to `value`.
    pub fn filled(width: i32, height: i32, value: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![value; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Build a grid from a row-major vector. Returns `None` if the length
    /// does not match `width * height`.
    pub fn from_vec(width: i32, height: i32, cells: Vec<T>) -> Option<Self> {
        if width < 0 || height < 0 || cells.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            cells,
            width,
            height,
        })
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y as usize) * (self.width as usize) + (p.x as usize)
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.width, self.height)
    }

    /// Returns the size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Get the cell at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Mutable access to the cell at a point, or `None` if out of bounds.
    #[inline]
    pub fn at_mut(&mut self, p: Point) -> Option<&mut T> {
        if !self.contains(p) {
            return None;
        }
        let i = self.index(p);
        Some(&mut self.cells[i])
    }

    /// Set the cell at a point. Returns `false` (and does nothing) if out of
    /// bounds.
    pub fn set(&mut self, p: Point, value: T) -> bool {
        match self.at_mut(p) {
            Some(c) => {
                *c = value;
                true
            }
            None => false,
        }
    }

    /// Fill the entire grid with the given value.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, T) -> bool) -> usize {
        self.iter().filter(|&(p, c)| f(p, c)).count()
    }

    /// Row-major cell values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over `(Point, T)` pairs in row-major order.
    pub fn iter(&self) -> GridIter<'_, T> {
        GridIter {
            grid: self,
            points: self.bounds().iter(),
        }
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    /// Count how many cells equal the given value.
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}

/// Iterator over `(Point, T)` pairs of a [`Grid`].
pub struct GridIter<'a, T> {
    grid: &'a Grid<T>,
    points: crate::geom::RangeIter,
}

impl<T: Copy> Iterator for GridIter<'_, T> {
    type Item = (Point, T);

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.points.next()?;
        Some((p, self.grid.cells[self.grid.index(p)]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl<T: Copy> ExactSizeIterator for GridIter<'_, T> {}

impl<'a, T: Copy> IntoIterator for &'a Grid<T> {
    type Item = (Point, T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> GridIter<'a, T> {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Copy + serde::Deserialize<'de>> serde::Deserialize<'de> for Grid<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        struct Raw<T> {
            cells: Vec<T>,
            width: i32,
            height: i32,
        }

        let Raw {
            cells,
            width,
            height,
        } = Raw::deserialize(deserializer)?;
        let n = cells.len();
        Grid::from_vec(width, height, cells)
            .ok_or_else(|| D::Error::custom(format!("grid: {n} cells for {width}x{height}")))
    }
}
