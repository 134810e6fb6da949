use crate::models::pagination_models::{PageResult, PaginationError, NO_PAGE};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Clamp `requested_page` into the pages available for `total_rows` and
/// derive the navigation links.
///
/// With `total_rows == 0` the result has `last_page == -1` but `page == 0`;
/// callers must treat that as "no data" and skip the row query.
pub fn compute_page(
    requested_page: i64,
    total_rows: i64,
    page_size: i64,
) -> Result<PageResult, PaginationError> {
    if page_size <= 0 {
        return Err(PaginationError::InvalidPageSize(page_size));
    }
    if total_rows < 0 {
        return Err(PaginationError::NegativeTotal(total_rows));
    }

    let pages = total_rows / page_size + i64::from(total_rows % page_size != 0);
    let last_page = pages - 1;

    let page = if requested_page < 0 {
        0
    } else if requested_page > last_page {
        last_page.max(0)
    } else {
        requested_page
    };

    let prev_page = if page > 0 { page - 1 } else { NO_PAGE };
    let next_page = if page < last_page { page + 1 } else { NO_PAGE };

    Ok(PageResult {
        prev_page,
        page,
        next_page,
        last_page,
        total: total_rows,
    })
}
