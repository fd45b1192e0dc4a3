//! Listing a user's records with optional month and category filters.

use rusqlite::{Connection, named_params};
use serde::Deserialize;
use time::{Date, Month};

use crate::{
    Error,
    auth::UserID,
    record::{
        Record, RecordKind,
        category::Category,
        core::{RECORD_COLUMNS, map_record_row},
    },
};

/// The query string accepted by the listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListQuery {
    /// The month to list, 1 to 12. Only applied together with `year`.
    pub month: Option<u8>,
    /// The year to list. Only applied together with `month`.
    pub year: Option<i32>,
    /// The category name to list. An empty string means every category.
    pub category: Option<String>,
}

/// A validated [ListQuery].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter<C> {
    /// The first and last day, inclusive, of the month to list.
    pub date_range: Option<(Date, Date)>,
    /// Only list records in this category.
    pub category: Option<C>,
}

impl ListQuery {
    /// Check the query parameters.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the month is not between 1 and 12, the
    /// year is out of range or the category is unknown.
    pub fn into_filter<C: Category>(self) -> Result<RecordFilter<C>, Error> {
        let date_range = match (self.month, self.year) {
            (Some(month), Some(year)) => Some(month_range(year, month)?),
            _ => None,
        };

        let category = match self.category.as_deref() {
            None | Some("") => None,
            Some(name) => Some(C::parse(name)?),
        };

        Ok(RecordFilter {
            date_range,
            category,
        })
    }
}

/// The first and last day of `month` in `year`.
///
/// # Errors
/// Returns [Error::Validation] if `month` is not between 1 and 12 or `year` is out of range.
pub fn month_range(year: i32, month: u8) -> Result<(Date, Date), Error> {
    let month = Month::try_from(month)
        .map_err(|_| Error::Validation(format!("Month must be between 1 and 12, got {month}")))?;

    let unsupported_year = || Error::Validation(format!("{year} is not a supported year"));

    let start = Date::from_calendar_date(year, month, 1).map_err(|_| unsupported_year())?;
    let end = match month {
        Month::December => Date::from_calendar_date(year, Month::December, 31),
        _ => Date::from_calendar_date(year, month.next(), 1)
            .map(|next_month_start| next_month_start - time::Duration::DAY),
    }
    .map_err(|_| unsupported_year())?;

    Ok((start, end))
}

/// The records matching a [RecordFilter] and their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList<C> {
    /// The matching records, newest first.
    pub records: Vec<Record<C>>,
    /// The sum of the amounts of `records`.
    pub total: f64,
}

/// Get the records of kind `K` owned by `owner` that match `filter`.
///
/// Records are sorted by date, newest first. Records on the same day are
/// sorted by ID, most recently created first.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn list_records<K: RecordKind>(
    owner: UserID,
    filter: &RecordFilter<K::Category>,
    connection: &Connection,
) -> Result<RecordList<K::Category>, Error> {
    let (start, end) = filter.date_range.unzip();

    let records = connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM {}
             WHERE user_id = :user_id
                AND (:start IS NULL OR date BETWEEN :start AND :end)
                AND (:category IS NULL OR category = :category)
             ORDER BY date DESC, id DESC",
            K::TABLE
        ))?
        .query_map(
            named_params! {
                ":user_id": owner.as_i64(),
                ":start": start,
                ":end": end,
                ":category": filter.category,
            },
            map_record_row,
        )?
        .collect::<Result<Vec<Record<K::Category>>, rusqlite::Error>>()?;

    let total = records.iter().map(|record| record.amount).sum();

    Ok(RecordList { records, total })
}

#[cfg(test)]
mod query_tests {
    use rusqlite::Connection;
    use time::macros::{date, datetime};

    use crate::{
        Error, PasswordHash, UserID,
        auth::create_user,
        db::initialize,
        record::{
            Expense, ExpenseCategory, RecordDraft, create_record,
            query::{ListQuery, RecordFilter, list_records, month_range},
        },
    };

    fn get_test_connection() -> (Connection, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_user(
            "Ada",
            "ada@example.com",
            PasswordHash::new_unchecked("hunter2"),
            &connection,
        )
        .unwrap();

        (connection, user.id)
    }

    fn insert(
        connection: &Connection,
        owner: UserID,
        amount: f64,
        category: ExpenseCategory,
        date: time::Date,
    ) -> i64 {
        create_record::<Expense>(
            owner,
            RecordDraft {
                title: format!("{category} {amount}"),
                amount,
                category,
                date,
                description: None,
            },
            datetime!(2024-01-01 00:00 UTC),
            connection,
        )
        .unwrap()
        .id
    }

    #[test]
    fn month_range_handles_leap_years() {
        assert_eq!(
            month_range(2024, 2),
            Ok((date!(2024 - 02 - 01), date!(2024 - 02 - 29)))
        );
        assert_eq!(
            month_range(2023, 12),
            Ok((date!(2023 - 12 - 01), date!(2023 - 12 - 31)))
        );
    }

    #[test]
    fn month_out_of_range_is_invalid() {
        assert!(matches!(month_range(2024, 0), Err(Error::Validation(_))));
        assert!(matches!(month_range(2024, 13), Err(Error::Validation(_))));
    }

    #[test]
    fn month_without_year_is_ignored() {
        let query = ListQuery {
            month: Some(3),
            year: None,
            category: None,
        };

        let filter = query.into_filter::<ExpenseCategory>().unwrap();

        assert_eq!(
            filter,
            RecordFilter {
                date_range: None,
                category: None
            }
        );
    }

    #[test]
    fn empty_category_is_ignored() {
        let query = ListQuery {
            category: Some(String::new()),
            ..Default::default()
        };

        let filter = query.into_filter::<ExpenseCategory>().unwrap();

        assert_eq!(filter.category, None);
    }

    #[test]
    fn unknown_category_is_invalid() {
        let query = ListQuery {
            category: Some("Groceries".to_owned()),
            ..Default::default()
        };

        assert!(matches!(
            query.into_filter::<ExpenseCategory>(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn lists_newest_first_with_total() {
        let (connection, owner) = get_test_connection();
        let first = insert(&connection, owner, 10.0, ExpenseCategory::Food, date!(2024 - 03 - 01));
        let second = insert(&connection, owner, 20.0, ExpenseCategory::Food, date!(2024 - 03 - 20));
        let third = insert(&connection, owner, 5.0, ExpenseCategory::Food, date!(2024 - 03 - 20));

        let list = list_records::<Expense>(
            owner,
            &RecordFilter {
                date_range: None,
                category: None,
            },
            &connection,
        )
        .unwrap();

        let ids: Vec<_> = list.records.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![third, second, first]);
        assert_eq!(list.total, 35.0);
    }

    #[test]
    fn filters_by_month_and_category() {
        let (connection, owner) = get_test_connection();
        insert(&connection, owner, 100.0, ExpenseCategory::Food, date!(2024 - 03 - 01));
        insert(&connection, owner, 50.0, ExpenseCategory::Food, date!(2024 - 03 - 31));
        insert(&connection, owner, 25.0, ExpenseCategory::Housing, date!(2024 - 03 - 15));
        insert(&connection, owner, 999.0, ExpenseCategory::Food, date!(2024 - 04 - 01));
        insert(&connection, owner, 999.0, ExpenseCategory::Food, date!(2024 - 02 - 29));

        let march = ListQuery {
            month: Some(3),
            year: Some(2024),
            category: None,
        }
        .into_filter()
        .unwrap();
        let march_food = ListQuery {
            month: Some(3),
            year: Some(2024),
            category: Some("Food".to_owned()),
        }
        .into_filter()
        .unwrap();

        let march_list = list_records::<Expense>(owner, &march, &connection).unwrap();
        let march_food_list = list_records::<Expense>(owner, &march_food, &connection).unwrap();

        assert_eq!(march_list.records.len(), 3);
        assert_eq!(march_list.total, 175.0);
        assert_eq!(march_food_list.records.len(), 2);
        assert_eq!(march_food_list.total, 150.0);
    }

    #[test]
    fn only_lists_records_of_owner() {
        let (connection, owner) = get_test_connection();
        let other = create_user(
            "Grace",
            "grace@example.com",
            PasswordHash::new_unchecked("hunter3"),
            &connection,
        )
        .unwrap()
        .id;
        insert(&connection, owner, 1.0, ExpenseCategory::Food, date!(2024 - 03 - 01));
        insert(&connection, other, 2.0, ExpenseCategory::Food, date!(2024 - 03 - 01));

        let list = list_records::<Expense>(
            owner,
            &RecordFilter {
                date_range: None,
                category: None,
            },
            &connection,
        )
        .unwrap();

        assert_eq!(list.records.len(), 1);
        assert_eq!(list.records[0].user, owner);
        assert_eq!(list.total, 1.0);
    }
}
