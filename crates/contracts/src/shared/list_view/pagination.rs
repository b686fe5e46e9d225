/// Постраничный вывод (страницы с нуля)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub rows_per_page: usize,
}

impl Pagination {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            page: 0,
            rows_per_page: rows_per_page.max(1),
        }
    }

    pub fn total_pages(&self, total_count: usize) -> usize {
        let size = self.rows_per_page.max(1);
        if total_count == 0 {
            1
        } else {
            (total_count + size - 1) / size
        }
    }

    /// Привести номер страницы к допустимому диапазону
    pub fn clamped(&self, total_count: usize) -> Self {
        let last = self.total_pages(total_count).saturating_sub(1);
        Self {
            page: self.page.min(last),
            rows_per_page: self.rows_per_page.max(1),
        }
    }

    /// `rows[page * rows_per_page .. page * rows_per_page + rows_per_page]`
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let size = self.rows_per_page.max(1);
        let start = (self.page * size).min(rows.len());
        let end = (start + size).min(rows.len());
        &rows[start..end]
    }

    /// Смена размера страницы возвращает на первую страницу
    pub fn with_rows_per_page(&self, rows_per_page: usize) -> Self {
        Self::new(rows_per_page)
    }
}
