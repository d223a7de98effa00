use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        PaginationParams {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        let p = PaginationParams::default();
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let p = PaginationParams {
            page: 3,
            page_size: 25,
        };
        assert_eq!(p.offset(), 50);
        assert_eq!(p.limit(), 25);
    }

    #[test]
    fn rejects_out_of_range_params() {
        assert!(PaginationParams {
            page: 0,
            page_size: 20
        }
        .validate()
        .is_err());
        assert!(PaginationParams {
            page: 1,
            page_size: 0
        }
        .validate()
        .is_err());
        assert!(PaginationParams {
            page: 1,
            page_size: MAX_PAGE_SIZE + 1
        }
        .validate()
        .is_err());
        assert!(PaginationParams {
            page: 1,
            page_size: MAX_PAGE_SIZE
        }
        .validate()
        .is_ok());
    }
}
