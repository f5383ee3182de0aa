use ndarray::{ArrayViewD, ArrayViewMutD, Axis, Slice};
use serde::{Deserialize, Serialize};

use crate::error::{PhasorError, Result};

/// An axis-aligned block of absolute sample indices.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub index: Vec<i64>,
    pub size: Vec<usize>,
}

impl Region {
    pub fn new(index: Vec<i64>, size: Vec<usize>) -> Self {
        Self { index, size }
    }

    pub fn ndim(&self) -> usize {
        self.size.len()
    }

    pub fn num_samples(&self) -> usize {
        self.size.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&s| s == 0)
    }

    /// One past the last index along `axis`, saturating at `i64::MAX`.
    pub fn end(&self, axis: usize) -> i64 {
        let size = i64::try_from(self.size[axis]).unwrap_or(i64::MAX);
        self.index[axis].saturating_add(size)
    }

    /// Whether `other` lies entirely inside this region.
    pub fn contains(&self, other: &Region) -> bool {
        self.ndim() == other.ndim()
            && (0..self.ndim())
                .all(|k| other.index[k] >= self.index[k] && other.end(k) <= self.end(k))
    }

    /// Whether the two regions share at least one index.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.ndim() == other.ndim()
            && !self.is_empty()
            && !other.is_empty()
            && (0..self.ndim())
                .all(|k| other.index[k] < self.end(k) && self.index[k] < other.end(k))
    }

    /// Per-axis offset of `inner` from this region's origin, or an error if
    /// `inner` does not fit.
    pub fn offset_of(&self, inner: &Region) -> Result<Vec<usize>> {
        if !self.contains(inner) {
            return Err(PhasorError::InvalidRegion(format!(
                "region {:?}+{:?} is not inside {:?}+{:?}",
                inner.index, inner.size, self.index, self.size
            )));
        }
        Ok(self
            .index
            .iter()
            .zip(&inner.index)
            .map(|(&outer, &i)| (i - outer) as usize)
            .collect())
    }

    /// Split into two along `axis` with the first half holding `at` samples.
    fn split_at(&self, axis: usize, at: usize) -> (Region, Region) {
        let mut first = self.clone();
        let mut second = self.clone();
        first.size[axis] = at;
        second.index[axis] += at as i64;
        second.size[axis] -= at;
        (first, second)
    }
}

/// View the part of an array covering `inner`, where the array itself covers `outer`.
pub fn region_view<'a, A>(
    array: ArrayViewD<'a, A>,
    outer: &Region,
    inner: &Region,
) -> Result<ArrayViewD<'a, A>> {
    let offset = outer.offset_of(inner)?;
    let mut view = array;
    view.slice_each_axis_inplace(|ax| {
        let k = ax.axis.index();
        Slice::from(offset[k]..offset[k] + inner.size[k])
    });
    Ok(view)
}

/// Mutable counterpart of [`region_view`].
pub fn region_view_mut<'a, A>(
    array: ArrayViewMutD<'a, A>,
    outer: &Region,
    inner: &Region,
) -> Result<ArrayViewMutD<'a, A>> {
    let offset = outer.offset_of(inner)?;
    let mut view = array;
    view.slice_each_axis_inplace(|ax| {
        let k = ax.axis.index();
        Slice::from(offset[k]..offset[k] + inner.size[k])
    });
    Ok(view)
}

/// Carve `array`, which covers `outer`, into one disjoint mutable view per
/// piece.
///
/// `pieces` must be a partition of `outer` (see [`validate_partition`]) that
/// axis-aligned cuts can separate; both built-in splitters produce one.
pub fn carve_views_mut<'a, A>(
    array: ArrayViewMutD<'a, A>,
    outer: &Region,
    mut pieces: Vec<Region>,
) -> Result<Vec<(Region, ArrayViewMutD<'a, A>)>> {
    if pieces.len() <= 1 {
        return match pieces.pop() {
            Some(piece) => {
                let view = region_view_mut(array, outer, &piece)?;
                Ok(vec![(piece, view)])
            }
            None => Ok(Vec::new()),
        };
    }

    let (axis, cut) = separating_cut(outer, &pieces).ok_or_else(|| {
        PhasorError::InvalidRegion(format!(
            "{} pieces of {:?}+{:?} cannot be separated by an axis-aligned cut",
            pieces.len(),
            outer.index,
            outer.size
        ))
    })?;
    let at = (cut - outer.index[axis]) as usize;
    let (first_view, second_view) = array.split_at(Axis(axis), at);
    let (first_outer, second_outer) = outer.split_at(axis, at);
    let (first, second): (Vec<Region>, Vec<Region>) =
        pieces.into_iter().partition(|p| p.end(axis) <= cut);

    let mut views = carve_views_mut(first_view, &first_outer, first)?;
    views.extend(carve_views_mut(second_view, &second_outer, second)?);
    Ok(views)
}

/// A plane `index[axis] == cut` strictly inside `outer` that no piece straddles.
fn separating_cut(outer: &Region, pieces: &[Region]) -> Option<(usize, i64)> {
    (0..outer.ndim()).find_map(|axis| {
        pieces
            .iter()
            .map(|p| p.end(axis))
            .filter(|&cut| cut > outer.index[axis] && cut < outer.end(axis))
            .find(|&cut| {
                pieces
                    .iter()
                    .all(|p| p.end(axis) <= cut || p.index[axis] >= cut)
            })
            .map(|cut| (axis, cut))
    })
}

/// Check that `pieces` are non-empty, lie inside `full`, never overlap and
/// together cover every sample of `full`.
pub fn validate_partition(full: &Region, pieces: &[Region]) -> Result<()> {
    let mut covered = 0usize;
    for (i, piece) in pieces.iter().enumerate() {
        if piece.is_empty() {
            return Err(PhasorError::InvalidRegion(format!("piece {i} is empty")));
        }
        full.offset_of(piece)?;
        if let Some(j) = pieces[..i].iter().position(|other| other.overlaps(piece)) {
            return Err(PhasorError::InvalidRegion(format!(
                "pieces {j} and {i} overlap"
            )));
        }
        covered += piece.num_samples();
    }
    if covered != full.num_samples() {
        return Err(PhasorError::InvalidRegion(format!(
            "pieces cover {covered} of {} samples",
            full.num_samples()
        )));
    }
    Ok(())
}

/// Partitions a region into disjoint sub-regions for parallel evaluation.
///
/// Implementations must return non-empty regions that together cover the
/// input exactly once, and at most `max_pieces` of them.
pub trait RegionSplitter: Send + Sync {
    fn name(&self) -> &str;

    fn split(&self, region: &Region, max_pieces: usize) -> Vec<Region>;
}

/// Cuts the region into contiguous slabs along axis 0.
///
/// Axis 0 is the outermost ndarray axis, so each slab is a contiguous block
/// of the output buffer.
pub struct SlowestAxisSplitter;

impl RegionSplitter for SlowestAxisSplitter {
    fn name(&self) -> &str {
        "slowest axis"
    }

    fn split(&self, region: &Region, max_pieces: usize) -> Vec<Region> {
        if region.is_empty() || region.ndim() == 0 {
            return Vec::new();
        }
        let extent = region.size[0];
        let pieces = max_pieces.clamp(1, extent);
        let base = extent / pieces;
        let remainder = extent % pieces;

        let mut out = Vec::with_capacity(pieces);
        let mut rest = region.clone();
        for i in 0..pieces - 1 {
            let len = base + usize::from(i < remainder);
            let (slab, tail) = rest.split_at(0, len);
            out.push(slab);
            rest = tail;
        }
        out.push(rest);
        out
    }
}

/// Repeatedly halves the largest piece along its longest axis.
pub struct BisectingSplitter;

impl RegionSplitter for BisectingSplitter {
    fn name(&self) -> &str {
        "bisecting"
    }

    fn split(&self, region: &Region, max_pieces: usize) -> Vec<Region> {
        if region.is_empty() || region.ndim() == 0 {
            return Vec::new();
        }
        let mut pieces = vec![region.clone()];
        while pieces.len() < max_pieces {
            let mut target: Option<usize> = None;
            for (i, piece) in pieces.iter().enumerate() {
                if piece.num_samples() < 2 {
                    continue;
                }
                let larger = match target {
                    Some(t) => piece.num_samples() > pieces[t].num_samples(),
                    None => true,
                };
                if larger {
                    target = Some(i);
                }
            }
            let Some(i) = target else {
                break;
            };

            let piece = pieces.swap_remove(i);
            let mut axis = 0;
            for k in 1..piece.ndim() {
                if piece.size[k] > piece.size[axis] {
                    axis = k;
                }
            }
            let (first, second) = piece.split_at(axis, piece.size[axis] / 2);
            pieces.push(first);
            pieces.push(second);
        }
        pieces.sort_by(|a, b| a.index.cmp(&b.index));
        pieces
    }
}

/// Splitter selection for configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitterKind {
    #[default]
    SlowestAxis,
    Bisecting,
}

impl SplitterKind {
    pub fn splitter(&self) -> Box<dyn RegionSplitter> {
        match self {
            Self::SlowestAxis => Box::new(SlowestAxisSplitter),
            Self::Bisecting => Box::new(BisectingSplitter),
        }
    }
}

impl std::fmt::Display for SplitterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SlowestAxis => write!(f, "Slowest Axis"),
            Self::Bisecting => write!(f, "Bisecting"),
        }
    }
}
