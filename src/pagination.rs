//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of items on a page, at least 1.
    pub limit: u64,
}

impl PageRequest {
    /// Parse the raw `page` and `limit` query parameters, falling back to
    /// the defaults in `config` when they are missing or blank.
    ///
    /// # Errors
    /// Returns [Error::Validation] if either value is not a positive integer,
    /// or if `limit` is larger than [PaginationConfig::max_page_size].
    pub fn parse(
        page: Option<&str>,
        limit: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = parse_positive(page, "page")?.unwrap_or(config.default_page);
        let limit = parse_positive(limit, "limit")?.unwrap_or(config.default_page_size);

        if limit > config.max_page_size {
            return Err(Error::Validation(format!(
                "limit must be at most {}",
                config.max_page_size
            )));
        }

        Ok(Self { page, limit })
    }

    /// The number of items to skip to reach this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>, name: &str) -> Result<Option<u64>, Error> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|&value| value >= 1)
            .map(Some)
            .ok_or_else(|| Error::Validation(format!("{name} must be a positive integer"))),
    }
}

/// The number of pages needed to show `total_items` with `limit` items per page.
pub fn total_pages(total_items: u64, limit: u64) -> u64 {
    total_items.div_ceil(limit.max(1))
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{PageRequest, PaginationConfig, total_pages};

    #[test]
    fn uses_defaults_when_missing() {
        let config = PaginationConfig::default();

        let got = PageRequest::parse(None, Some(""), &config).unwrap();

        assert_eq!(got, PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn parses_page_and_limit() {
        let got = PageRequest::parse(Some("3"), Some(" 25 "), &PaginationConfig::default())
            .unwrap();

        assert_eq!(got, PageRequest { page: 3, limit: 25 });
        assert_eq!(got.offset(), 50);
    }

    #[test]
    fn rejects_zero_negative_and_non_numeric_values() {
        let config = PaginationConfig::default();

        for raw in ["0", "-1", "1.5", "abc"] {
            assert!(
                matches!(
                    PageRequest::parse(Some(raw), None, &config),
                    Err(Error::Validation(_))
                ),
                "page={raw:?} should be rejected"
            );
            assert!(
                matches!(
                    PageRequest::parse(None, Some(raw), &config),
                    Err(Error::Validation(_))
                ),
                "limit={raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_limit_above_maximum() {
        let config = PaginationConfig {
            max_page_size: 50,
            ..Default::default()
        };

        assert!(PageRequest::parse(None, Some("50"), &config).is_ok());
        assert_eq!(
            PageRequest::parse(None, Some("51"), &config),
            Err(Error::Validation("limit must be at most 50".to_owned()))
        );
    }

    #[test]
    fn first_page_has_no_offset() {
        assert_eq!(PageRequest { page: 1, limit: 10 }.offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        for total_items in 0..=50u64 {
            for limit in 1..=12u64 {
                let want = (total_items as f64 / limit as f64).ceil() as u64;

                assert_eq!(
                    total_pages(total_items, limit),
                    want,
                    "total_items={total_items}, limit={limit}"
                );
            }
        }
    }
}
