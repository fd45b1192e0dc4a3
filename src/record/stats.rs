//! Monthly and per-category totals of a user's records for one year.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{Error, auth::UserID, record::RecordKind};

/// The total and number of records in one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// The month, 1 for January to 12 for December.
    pub month: u8,
    /// The sum of the amounts of the records in the month.
    pub total: f64,
    /// The number of records in the month.
    pub count: u32,
}

/// The total and number of records in one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal<C> {
    /// The category.
    pub category: C,
    /// The sum of the amounts of the records in the category.
    pub total: f64,
    /// The number of records in the category.
    pub count: u32,
}

/// The aggregates for a year of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStats<C> {
    /// Totals for the months that have at least one record, in calendar order.
    pub monthly: Vec<MonthlyTotal>,
    /// Totals for the categories that have at least one record, largest first.
    pub by_category: Vec<CategoryTotal<C>>,
}

/// The first and last day of `year`.
///
/// # Errors
/// Returns [Error::Validation] if `year` is outside the supported calendar range.
pub fn year_range(year: i32) -> Result<(Date, Date), Error> {
    let unsupported_year = |_| Error::Validation(format!("{year} is not a supported year"));

    let start = Date::from_calendar_date(year, Month::January, 1).map_err(unsupported_year)?;
    let end = Date::from_calendar_date(year, Month::December, 31).map_err(unsupported_year)?;

    Ok((start, end))
}

/// Compute the monthly and per-category totals of the records of kind `K`
/// owned by `owner` between `start` and `end`, inclusive.
///
/// Months and categories without any records are left out.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_stats<K: RecordKind>(
    owner: UserID,
    (start, end): (Date, Date),
    connection: &Connection,
) -> Result<YearStats<K::Category>, Error> {
    let user_id = owner.as_i64();
    let params = named_params! {
        ":user_id": user_id,
        ":start": start,
        ":end": end,
    };

    let monthly = connection
        .prepare(&format!(
            "SELECT CAST(strftime('%m', date) AS INTEGER) AS month, SUM(amount), COUNT(id)
             FROM {}
             WHERE user_id = :user_id AND date BETWEEN :start AND :end
             GROUP BY month
             ORDER BY month",
            K::TABLE
        ))?
        .query_map(params, |row| {
            Ok(MonthlyTotal {
                month: row.get(0)?,
                total: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    let by_category = connection
        .prepare(&format!(
            "SELECT category, SUM(amount) AS total, COUNT(id)
             FROM {}
             WHERE user_id = :user_id AND date BETWEEN :start AND :end
             GROUP BY category
             ORDER BY total DESC, category ASC",
            K::TABLE
        ))?
        .query_map(params, |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    Ok(YearStats {
        monthly,
        by_category,
    })
}

/// Expand `monthly` to all twelve months, using zero for missing months.
pub fn fill_months(monthly: &[MonthlyTotal]) -> [MonthlyTotal; 12] {
    let mut filled: [MonthlyTotal; 12] = std::array::from_fn(|i| MonthlyTotal {
        month: i as u8 + 1,
        total: 0.0,
        count: 0,
    });

    for month_total in monthly {
        if (1..=12).contains(&month_total.month) {
            filled[usize::from(month_total.month - 1)] = *month_total;
        }
    }

    filled
}

#[cfg(test)]
mod stats_tests {
    use rusqlite::Connection;
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::{
        Error, PasswordHash, UserID,
        auth::create_user,
        db::initialize,
        record::{
            Expense, ExpenseCategory, Income, IncomeCategory, RecordDraft, RecordKind,
            create_record,
            stats::{CategoryTotal, MonthlyTotal, fill_months, get_stats, year_range},
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

    fn insert<K: RecordKind>(
        connection: &Connection,
        owner: UserID,
        amount: f64,
        category: K::Category,
        date: Date,
    ) {
        create_record::<K>(
            owner,
            RecordDraft {
                title: "Test".to_owned(),
                amount,
                category,
                date,
                description: None,
            },
            datetime!(2024-01-01 00:00 UTC),
            connection,
        )
        .unwrap();
    }

    #[test]
    fn year_range_covers_whole_year() {
        assert_eq!(
            year_range(2024),
            Ok((date!(2024 - 01 - 01), date!(2024 - 12 - 31)))
        );
        assert!(matches!(year_range(100_000), Err(Error::Validation(_))));
    }

    #[test]
    fn monthly_totals_sum_records_in_each_month() {
        let (connection, owner) = get_test_connection();
        insert::<Expense>(&connection, owner, 100.0, ExpenseCategory::Food, date!(2024 - 03 - 01));
        insert::<Expense>(&connection, owner, 50.0, ExpenseCategory::Food, date!(2024 - 03 - 15));
        insert::<Expense>(&connection, owner, 25.0, ExpenseCategory::Shopping, date!(2024 - 03 - 31));
        insert::<Expense>(&connection, owner, 10.0, ExpenseCategory::Food, date!(2024 - 01 - 05));
        // Outside the year.
        insert::<Expense>(&connection, owner, 999.0, ExpenseCategory::Food, date!(2023 - 12 - 31));
        insert::<Expense>(&connection, owner, 999.0, ExpenseCategory::Food, date!(2025 - 01 - 01));

        let stats = get_stats::<Expense>(owner, year_range(2024).unwrap(), &connection).unwrap();

        assert_eq!(
            stats.monthly,
            vec![
                MonthlyTotal {
                    month: 1,
                    total: 10.0,
                    count: 1
                },
                MonthlyTotal {
                    month: 3,
                    total: 175.0,
                    count: 3
                },
            ]
        );
    }

    #[test]
    fn aggregates_only_include_owner_records() {
        let (connection, owner) = get_test_connection();
        let other = create_user(
            "Grace",
            "grace@example.com",
            PasswordHash::new_unchecked("hunter3"),
            &connection,
        )
        .unwrap()
        .id;
        insert::<Expense>(&connection, owner, 40.0, ExpenseCategory::Food, date!(2024 - 06 - 01));
        insert::<Expense>(&connection, other, 500.0, ExpenseCategory::Food, date!(2024 - 06 - 02));
        insert::<Expense>(&connection, other, 70.0, ExpenseCategory::Housing, date!(2024 - 07 - 01));

        let stats = get_stats::<Expense>(owner, year_range(2024).unwrap(), &connection).unwrap();

        assert_eq!(
            stats.monthly,
            vec![MonthlyTotal {
                month: 6,
                total: 40.0,
                count: 1
            }]
        );
        assert_eq!(
            stats.by_category,
            vec![CategoryTotal {
                category: ExpenseCategory::Food,
                total: 40.0,
                count: 1
            }]
        );
    }

    #[test]
    fn category_totals_are_sorted_largest_first() {
        let (connection, owner) = get_test_connection();
        insert::<Income>(&connection, owner, 20.0, IncomeCategory::Gifts, date!(2024 - 05 - 01));
        insert::<Income>(&connection, owner, 3000.0, IncomeCategory::Salary, date!(2024 - 05 - 01));
        insert::<Income>(&connection, owner, 500.0, IncomeCategory::Freelance, date!(2024 - 06 - 01));
        insert::<Income>(&connection, owner, 20.0, IncomeCategory::Allowance, date!(2024 - 07 - 01));

        let stats = get_stats::<Income>(owner, year_range(2024).unwrap(), &connection).unwrap();

        assert_eq!(
            stats.by_category,
            vec![
                CategoryTotal {
                    category: IncomeCategory::Salary,
                    total: 3000.0,
                    count: 1
                },
                CategoryTotal {
                    category: IncomeCategory::Freelance,
                    total: 500.0,
                    count: 1
                },
                // Ties are broken by name.
                CategoryTotal {
                    category: IncomeCategory::Allowance,
                    total: 20.0,
                    count: 1
                },
                CategoryTotal {
                    category: IncomeCategory::Gifts,
                    total: 20.0,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn empty_year_has_no_aggregates() {
        let (connection, owner) = get_test_connection();

        let stats = get_stats::<Expense>(owner, year_range(2024).unwrap(), &connection).unwrap();

        assert!(stats.monthly.is_empty());
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn fill_months_adds_zero_months() {
        let filled = fill_months(&[MonthlyTotal {
            month: 3,
            total: 175.0,
            count: 3,
        }]);

        assert_eq!(filled.len(), 12);
        assert_eq!(filled[0].month, 1);
        assert_eq!(filled[0].total, 0.0);
        assert_eq!(filled[2].total, 175.0);
        assert_eq!(filled[2].count, 3);
        assert_eq!(filled[11].month, 12);
    }
}
