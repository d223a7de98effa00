use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobFilter, SortDirection};
use crate::prelude::Result;

const JOB_COLUMNS: &str = "id, title, date_posted, salary, contract, reference_number, \
                           address, closing_date, sponsored, link, is_closed";

// $1 is the open-on date and $2 the excluded id set, both always bound;
// optional predicates extend the parameter list in declaration order.
fn filter_clause(filter: &JobFilter) -> (String, usize) {
    let mut clause = String::from(" WHERE closing_date >= $1 AND id <> ALL($2)");
    let mut param_count = 2;

    if filter.sponsored.is_some() {
        param_count += 1;
        clause.push_str(&format!(" AND sponsored = ${}", param_count));
    }
    if filter.search.is_some() {
        param_count += 1;
        clause.push_str(&format!(" AND title ILIKE ${}", param_count));
    }
    (clause, param_count)
}

fn search_pattern(search: &str) -> String {
    format!("%{}%", search)
}

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    /// Total matching the predicate, independent of pagination. Kept as a
    /// separate count statement so a short page never shrinks the total.
    pub async fn count_open(&mut self, filter: &JobFilter) -> Result<i64> {
        let (clause, _) = filter_clause(filter);
        let sql = format!("SELECT count(*) FROM jobs{clause}");
        let mut query = sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.open_on)
            .bind(&filter.excluded_ids);
        if let Some(sponsored) = filter.sponsored {
            query = query.bind(sponsored);
        }
        if let Some(search) = &filter.search {
            query = query.bind(search_pattern(search));
        }
        let total = query.fetch_one(&mut *self.pool).await?;
        Ok(total)
    }

    pub async fn list_open(
        &mut self,
        filter: &JobFilter,
        sort: SortDirection,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<JobEntry>> {
        let (clause, bound) = filter_clause(filter);
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM jobs{clause} ORDER BY closing_date {}, id OFFSET ${} LIMIT ${}",
            sort.as_sql(),
            bound + 1,
            bound + 2,
        );
        let mut query = sqlx::query_as::<_, JobEntry>(&sql)
            .bind(filter.open_on)
            .bind(&filter.excluded_ids);
        if let Some(sponsored) = filter.sponsored {
            query = query.bind(sponsored);
        }
        if let Some(search) = &filter.search {
            query = query.bind(search_pattern(search));
        }
        let rows = query
            .bind(offset)
            .bind(limit)
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_ids(&mut self, ids: &[Uuid]) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base_filter() -> JobFilter {
        JobFilter {
            open_on: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            excluded_ids: vec![],
            sponsored: None,
            search: None,
        }
    }

    #[test]
    fn clause_always_guards_closing_date_and_exclusions() {
        let (clause, bound) = filter_clause(&base_filter());
        assert_eq!(clause, " WHERE closing_date >= $1 AND id <> ALL($2)");
        assert_eq!(bound, 2);
    }

    #[test]
    fn optional_predicates_extend_parameters_in_order() {
        let mut filter = base_filter();
        filter.sponsored = Some(true);
        assert_eq!(
            filter_clause(&filter),
            (
                " WHERE closing_date >= $1 AND id <> ALL($2) AND sponsored = $3".into(),
                3
            )
        );

        filter.search = Some("nurse".into());
        assert_eq!(
            filter_clause(&filter),
            (
                " WHERE closing_date >= $1 AND id <> ALL($2) AND sponsored = $3 AND title ILIKE $4"
                    .into(),
                4
            )
        );

        filter.sponsored = None;
        assert_eq!(
            filter_clause(&filter),
            (
                " WHERE closing_date >= $1 AND id <> ALL($2) AND title ILIKE $3".into(),
                3
            )
        );
    }

    #[test]
    fn search_is_a_substring_match() {
        assert_eq!(search_pattern("nurse"), "%nurse%");
    }
}
