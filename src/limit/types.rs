//! Window limiter types
//!
//! Defines the `Limit` state machine, the immutable `LimitConfig` template it is built from and
//! the collected `Page` result.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Limit
// ============================================================================

/// Skip/take window over a sequentially delivered stream of candidate items.
///
/// A `Limit` is driven by the caller once per candidate, in order:
///
/// ```
/// use rowlimit::Limit;
///
/// // Second page of 25: skip the first 25 items, keep up to 25.
/// let mut limit = Limit::new(25, Some(25));
/// let mut page = Vec::new();
/// for row in 0..100 {
///     limit.next_row();
///     if limit.should_output() {
///         page.push(row);
///     }
///     // Enough items collected, stop pulling from the source.
///     if !limit.should_continue() {
///         break;
///     }
/// }
/// assert_eq!(page, (25..50).collect::<Vec<_>>());
/// ```
///
/// The bounded budget starts at `max_items + 1`. The extra slot means the window is only
/// reported closed after one candidate beyond it has been seen, which tells the caller that
/// more rows exist.
///
/// A limiter carries mutable progress and belongs to exactly one traversal. Build a new one
/// (or use a [`LimitConfig`]) for every traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    items_to_skip: u64,
    max_items: u64,
    skip_remaining: u64,
    // Unsigned so `max_items + 1` stays exact for any positive i64; saturates at 0
    output_budget: Option<u64>,
    skipping_current: bool,
}

impl Limit {
    /// Create a new limit.
    ///
    /// A negative `items_to_skip` is treated as 0. A `max_items` of `None` or `<= 0` disables the
    /// upper bound.
    pub fn new(items_to_skip: i64, max_items: Option<i64>) -> Self {
        if items_to_skip < 0 {
            tracing::debug!("Clamping negative skip {} to 0", items_to_skip);
        }
        let items_to_skip = items_to_skip.max(0) as u64;

        let (max_items, output_budget) = match max_items {
            Some(max) if max > 0 => (max as u64, Some(max as u64 + 1)),
            Some(max) => {
                tracing::debug!("Non-positive max items {} means no upper limit", max);
                (0, None)
            }
            None => (0, None),
        };

        Self {
            items_to_skip,
            max_items,
            skip_remaining: items_to_skip,
            output_budget,
            skipping_current: false,
        }
    }

    /// A limit which does not skip anything and has no upper bound
    pub fn unlimited() -> Self {
        Self::new(0, None)
    }

    /// A limit which only accepts the first item
    pub fn single_item() -> Self {
        Self::new(0, Some(1))
    }

    /// Notify the limit that the next candidate is being processed.
    ///
    /// Must be called once per candidate before [`should_output`](Self::should_output) or
    /// [`should_continue`](Self::should_continue) are asked about it.
    pub fn next_row(&mut self) {
        if self.skip_remaining > 0 {
            self.skip_remaining -= 1;
            self.skipping_current = true;
            return;
        }

        self.skipping_current = false;
        if let Some(budget) = self.output_budget.as_mut() {
            *budget = budget.saturating_sub(1);
        }
    }

    /// Whether the current candidate falls inside the window
    pub fn should_output(&self) -> bool {
        !self.skipping_current && self.skip_remaining == 0 && self.has_budget()
    }

    /// Whether more candidates may still end up in the window.
    ///
    /// Turns false once, right after the first candidate past the end of the window has been
    /// advanced, and stays false.
    pub fn should_continue(&self) -> bool {
        self.has_budget()
    }

    fn has_budget(&self) -> bool {
        self.output_budget.map_or(true, |budget| budget > 0)
    }

    /// Max number of items to accept, 0 if there is no upper bound
    pub fn max_items(&self) -> u64 {
        self.max_items
    }

    /// Number of items skipped before the window starts
    pub fn items_to_skip(&self) -> u64 {
        self.items_to_skip
    }

    /// Items to skip plus items to accept, 0 if there is no upper bound.
    ///
    /// Computed from the construction parameters, so it does not change while the limit is
    /// being advanced.
    pub fn total_items(&self) -> u64 {
        if self.max_items == 0 {
            0
        } else {
            self.items_to_skip + self.max_items
        }
    }

    /// Check if there is no upper bound
    pub fn is_unlimited(&self) -> bool {
        self.output_budget.is_none()
    }

    /// The template this limit was built from
    pub fn config(&self) -> LimitConfig {
        LimitConfig {
            skip: self.items_to_skip as i64,
            limit: (self.max_items > 0).then_some(self.max_items as i64),
        }
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl From<LimitConfig> for Limit {
    fn from(config: LimitConfig) -> Self {
        config.build()
    }
}

// ============================================================================
// LimitConfig
// ============================================================================

/// Immutable description of a window.
///
/// Holds the raw values as configured. Every [`build`](Self::build) call returns a fresh
/// [`Limit`], so a config can be shared freely between traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Number of items to skip
    #[serde(default, alias = "offset")]
    pub skip: i64,
    /// Max number of items to keep (`None` or `<= 0` for no limit)
    #[serde(default, alias = "max_items", skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl LimitConfig {
    /// No skipping, no upper bound
    pub const UNLIMITED: Self = Self {
        skip: 0,
        limit: None,
    };

    /// Only the first item
    pub const SINGLE_ITEM: Self = Self {
        skip: 0,
        limit: Some(1),
    };

    /// Create a new window config
    pub const fn new(skip: i64, limit: Option<i64>) -> Self {
        Self { skip, limit }
    }

    /// Window covering a zero-based page of `page_size` items.
    ///
    /// A `page_size` of 0 means the whole remainder after the skipped pages, which is everything.
    pub fn for_page(page: u32, page_size: u32) -> Self {
        if page_size == 0 {
            return Self::UNLIMITED;
        }
        Self {
            skip: i64::from(page) * i64::from(page_size),
            limit: Some(i64::from(page_size)),
        }
    }

    /// Build a fresh limiter for one traversal
    pub fn build(&self) -> Limit {
        Limit::new(self.skip, self.limit)
    }
}

impl fmt::Display for LimitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.limit {
            Some(limit) if limit > 0 => write!(f, "skip {}, take {}", self.skip.max(0), limit),
            _ => write!(f, "skip {}, take all", self.skip.max(0)),
        }
    }
}

// ============================================================================
// Page
// ============================================================================

/// Items collected from one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items inside the window, in traversal order
    pub items: Vec<T>,
    /// Number of items skipped before the window
    pub skip: u64,
    /// Max items of the window (0 for unbounded)
    pub max_items: u64,
    /// Whether the source had at least one item past the window
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Number of collected items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no items fell inside the window
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Config of the next page, if the source has more items.
    ///
    /// `None` as well when the next offset is out of `i64` range.
    pub fn next_config(&self) -> Option<LimitConfig> {
        if !self.has_more || self.max_items == 0 {
            return None;
        }
        let skip = i64::try_from(self.skip.checked_add(self.max_items)?).ok()?;
        let limit = i64::try_from(self.max_items).ok()?;
        Some(LimitConfig::new(skip, Some(limit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_exact_at_i64_max() {
        let limit = Limit::new(0, Some(i64::MAX));
        assert_eq!(limit.output_budget, Some(i64::MAX as u64 + 1));
        assert_eq!(limit.max_items(), i64::MAX as u64);
    }

    #[test]
    fn test_budget_saturates_at_zero() {
        let mut limit = Limit::new(0, Some(1));
        for _ in 0..5 {
            limit.next_row();
        }
        assert_eq!(limit.output_budget, Some(0));
        assert!(!limit.should_continue());
    }
}
