//! Row clustering.
//!
//! Boxes are visited top-to-bottom once. A box joins the open row when its
//! top edge is within half its own height of the row anchor (the top edge of
//! the box that opened the row); otherwise it opens a new row. There is no
//! backtracking, so a tall box can pull a following short box into its row
//! and vice versa.

use serde::Serialize;

use crate::types::BoundingBox;

/// A horizontal band of frames ordered left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Top edge of the box that opened this row.
    pub anchor_y: u32,
    pub boxes: Vec<BoundingBox>,
}

impl Row {
    fn open(first: BoundingBox) -> Self {
        Self {
            anchor_y: first.y,
            boxes: vec![first],
        }
    }

    /// True when `b` belongs to this row: `|b.y - anchor| < b.height / 2`.
    fn accepts(&self, b: &BoundingBox) -> bool {
        u64::from(b.y.abs_diff(self.anchor_y)) * 2 < u64::from(b.height)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Group boxes into rows, top row first, each row sorted by `x`.
pub fn cluster_rows(boxes: &[BoundingBox]) -> Vec<Row> {
    let mut sorted = boxes.to_vec();
    sorted.sort_by_key(|b| b.y);

    let mut rows: Vec<Row> = Vec::new();
    for b in sorted {
        match rows.last_mut() {
            Some(row) if row.accepts(&b) => row.boxes.push(b),
            _ => rows.push(Row::open(b)),
        }
    }

    for row in &mut rows {
        row.boxes.sort_by_key(|b| b.x);
    }

    rows
}
