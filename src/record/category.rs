//! The fixed sets of categories that expenses and income entries are filed under.

use std::{fmt::Display, hash::Hash, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::Error;

/// A closed set of category names for one kind of record.
pub trait Category:
    Copy
    + Default
    + Display
    + Eq
    + Hash
    + std::fmt::Debug
    + FromStr<Err = Error>
    + Serialize
    + DeserializeOwned
    + ToSql
    + FromSql
    + Send
    + Sync
    + 'static
{
    /// Every category, in declaration order.
    const ALL: &'static [Self];

    /// The name of the category as shown to users and stored in the database.
    fn as_str(&self) -> &'static str;

    /// Find the category called `name`. Names are case-sensitive.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing the valid names if `name` is not one of them.
    fn parse(name: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == name)
            .ok_or_else(|| {
                let valid_names = Self::ALL
                    .iter()
                    .map(|category| category.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");

                Error::Validation(format!(
                    "'{name}' is not a valid category, expected one of {valid_names}"
                ))
            })
    }
}

/// What an expense was spent on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[allow(missing_docs)]
    Food,
    #[allow(missing_docs)]
    Transportation,
    #[allow(missing_docs)]
    Entertainment,
    #[allow(missing_docs)]
    Shopping,
    #[allow(missing_docs)]
    Utilities,
    #[allow(missing_docs)]
    Housing,
    #[allow(missing_docs)]
    Healthcare,
    #[allow(missing_docs)]
    Education,
    #[allow(missing_docs)]
    Personal,
    /// Anything that does not fit another category.
    #[default]
    Other,
}

impl Category for ExpenseCategory {
    const ALL: &'static [Self] = &[
        Self::Food,
        Self::Transportation,
        Self::Entertainment,
        Self::Shopping,
        Self::Utilities,
        Self::Housing,
        Self::Healthcare,
        Self::Education,
        Self::Personal,
        Self::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Housing => "Housing",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Personal => "Personal",
            Self::Other => "Other",
        }
    }
}

/// Where an income entry came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    #[allow(missing_docs)]
    Salary,
    #[allow(missing_docs)]
    Freelance,
    #[allow(missing_docs)]
    Investments,
    #[allow(missing_docs)]
    Gifts,
    #[allow(missing_docs)]
    Allowance,
    /// Anything that does not fit another category.
    #[default]
    Other,
}

impl Category for IncomeCategory {
    const ALL: &'static [Self] = &[
        Self::Salary,
        Self::Freelance,
        Self::Investments,
        Self::Gifts,
        Self::Allowance,
        Self::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investments => "Investments",
            Self::Gifts => "Gifts",
            Self::Allowance => "Allowance",
            Self::Other => "Other",
        }
    }
}

// The string and SQL conversions are identical for both category types.
macro_rules! impl_category_conversions {
    ($category:ty) => {
        impl Display for $category {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $category {
            type Err = Error;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                <Self as Category>::parse(name)
            }
        }

        impl ToSql for $category {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $category {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let name = value.as_str()?;
                <Self as Category>::parse(name).map_err(|error| FromSqlError::Other(Box::new(error)))
            }
        }
    };
}

impl_category_conversions!(ExpenseCategory);
impl_category_conversions!(IncomeCategory);
