use std::ops::Range;

use ndarray::Array1;

/// One row of a sparse matrix: a fixed width plus the non-zero entries in
/// strictly increasing column order.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseRow {
    width: usize,
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl SparseRow {
    /// An all-zero row of the given width.
    pub fn zeros(width: usize) -> Self {
        Self {
            width,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// A one-hot row with a single `1.0` at `index`.
    pub fn indicator(width: usize, index: usize) -> Self {
        debug_assert!(index < width);
        Self {
            width,
            indices: vec![index],
            values: vec![1.0],
        }
    }

    /// Builds a row from `(column, value)` pairs already sorted by column.
    /// Zero values are dropped.
    pub(crate) fn from_sorted(width: usize, entries: impl IntoIterator<Item = (usize, f32)>) -> Self {
        let mut row = Self::zeros(width);
        for (index, value) in entries {
            debug_assert!(index < width);
            debug_assert!(row.indices.last().map_or(true, |&last| last < index));
            if value != 0.0 {
                row.indices.push(index);
                row.values.push(value);
            }
        }
        row
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Iterates over `(column, value)` pairs of the non-zero entries.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `column`, zero when it is not stored.
    pub fn get(&self, column: usize) -> f32 {
        match self.indices.binary_search(&column) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn to_dense(&self) -> Array1<f32> {
        let mut dense = Array1::zeros(self.width);
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }
}

/// The four feature blocks, in the column order the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureBlock {
    Headline,
    Description,
    Author,
    Year,
}

impl FeatureBlock {
    /// Column order of the assembled feature vector. Reordering this
    /// silently corrupts every prediction.
    pub const ORDER: [FeatureBlock; 4] = [
        FeatureBlock::Headline,
        FeatureBlock::Description,
        FeatureBlock::Author,
        FeatureBlock::Year,
    ];

    fn position(self) -> usize {
        match self {
            FeatureBlock::Headline => 0,
            FeatureBlock::Description => 1,
            FeatureBlock::Author => 2,
            FeatureBlock::Year => 3,
        }
    }
}

/// The encoder output for a single article, one row per block.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBlocks {
    pub headline: SparseRow,
    pub description: SparseRow,
    pub author: SparseRow,
    pub year: SparseRow,
}

/// The assembled model input:
/// `[headline | description | author one-hot | year one-hot]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    row: SparseRow,
    block_widths: [usize; 4],
}

impl FeatureVector {
    pub fn width(&self) -> usize {
        self.row.width()
    }

    pub fn row(&self) -> &SparseRow {
        &self.row
    }

    pub fn block_widths(&self) -> [usize; 4] {
        self.block_widths
    }

    /// Column range occupied by `block`.
    pub fn block_range(&self, block: FeatureBlock) -> Range<usize> {
        let position = block.position();
        let start: usize = self.block_widths[..position].iter().sum();
        start..start + self.block_widths[position]
    }

    /// Copies the entries of one block back out, re-based to column zero.
    pub fn block(&self, block: FeatureBlock) -> SparseRow {
        let range = self.block_range(block);
        SparseRow::from_sorted(
            range.len(),
            self.row
                .iter()
                .filter(|(index, _)| range.contains(index))
                .map(|(index, value)| (index - range.start, value)),
        )
    }
}

/// Horizontally stacks the encoded blocks in [`FeatureBlock::ORDER`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureAssembler;

impl FeatureAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(
        &self,
        headline: &SparseRow,
        description: &SparseRow,
        author: &SparseRow,
        year: &SparseRow,
    ) -> FeatureVector {
        let blocks = [headline, description, author, year];
        let block_widths = blocks.map(SparseRow::width);
        let width = block_widths.iter().sum();
        let nnz = blocks.iter().map(|block| block.nnz()).sum();

        let mut row = SparseRow {
            width,
            indices: Vec::with_capacity(nnz),
            values: Vec::with_capacity(nnz),
        };
        let mut offset = 0;
        for block in blocks {
            for (index, value) in block.iter() {
                row.indices.push(offset + index);
                row.values.push(value);
            }
            offset += block.width();
        }

        FeatureVector { row, block_widths }
    }

    pub fn assemble_blocks(&self, blocks: &EncodedBlocks) -> FeatureVector {
        self.assemble(&blocks.headline, &blocks.description, &blocks.author, &blocks.year)
    }
}
