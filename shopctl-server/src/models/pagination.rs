//! Pagination window for catalog queries

/// Maximum rows per page
pub const MAX_LIMIT: i64 = 500;

/// Rows per page when the caller gives none (or an unusable value)
pub const DEFAULT_LIMIT: i64 = 50;

/// Clamped LIMIT/OFFSET pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Create a page window with clamping.
    ///
    /// - Missing, zero or negative limit falls back to 50
    /// - Limit above 500 is clamped to 500
    /// - Missing or negative offset becomes 0
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(v) if v > 0 => v.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };
        let offset = offset.filter(|v| *v >= 0).unwrap_or(0);

        Self { limit, offset }
    }

    /// SQL LIMIT value, always within 1..=500.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// SQL OFFSET value, never negative.
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = Page::new(None, None);
        assert_eq!(p, Page::default());
        assert_eq!(p.limit(), 50);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn clamps_limit() {
        assert_eq!(Page::new(Some(1000), None).limit(), 500);
        assert_eq!(Page::new(Some(500), None).limit(), 500);
        assert_eq!(Page::new(Some(1), None).limit(), 1);
    }

    #[test]
    fn unusable_limit_falls_back() {
        assert_eq!(Page::new(Some(0), None).limit(), 50);
        assert_eq!(Page::new(Some(-7), None).limit(), 50);
    }

    #[test]
    fn clamps_offset() {
        assert_eq!(Page::new(None, Some(-1)).offset(), 0);
        assert_eq!(Page::new(None, Some(120)).offset(), 120);
    }
}
