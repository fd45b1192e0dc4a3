//! The request body for creating and replacing records, and its validation.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    record::{Category, RecordDraft},
};

/// The maximum number of characters in a record's title.
pub const MAX_TITLE_LENGTH: usize = 100;

/// The maximum number of characters in a record's description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// An amount as sent by a client, either a JSON number or the text of an input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `45.5`.
    Number(f64),
    /// A numeric string, e.g. `"45.50"`.
    Text(String),
}

impl AmountInput {
    /// The amount as a number, `None` for blank text.
    fn parse(&self) -> Result<Option<f64>, Error> {
        match self {
            AmountInput::Number(value) => Ok(Some(*value)),
            AmountInput::Text(text) if text.trim().is_empty() => Ok(None),
            AmountInput::Text(text) => text.trim().parse::<f64>().map(Some).map_err(|_| {
                Error::Validation("Amount must be a positive number".to_owned())
            }),
        }
    }
}

/// The raw fields of a record as sent by a client.
///
/// Every field is optional here so that a missing field produces a readable
/// validation message instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordForm {
    /// A short summary of what the money was for.
    pub title: Option<String>,
    /// How much money was spent or earned.
    pub amount: Option<AmountInput>,
    /// The category name, defaults to "Other".
    pub category: Option<String>,
    /// The day the money was spent or earned.
    pub date: Option<Date>,
    /// Optional longer notes.
    pub description: Option<String>,
}

impl RecordForm {
    /// Validate the form, using `default_date` if the client did not send a date.
    ///
    /// # Errors
    /// Returns [Error::Validation] describing the first invalid field.
    pub fn into_draft<C: Category>(self, default_date: Date) -> Result<RecordDraft<C>, Error> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(Error::Validation("Please provide a title".to_owned()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(Error::Validation(format!(
                "Title cannot be more than {MAX_TITLE_LENGTH} characters"
            )));
        }

        let amount = self.amount.as_ref().map(AmountInput::parse).transpose()?;
        let amount = match amount.flatten() {
            Some(amount) if amount.is_finite() && amount >= 0.0 => amount,
            Some(_) => {
                return Err(Error::Validation(
                    "Amount must be a positive number".to_owned(),
                ));
            }
            None => return Err(Error::Validation("Please provide an amount".to_owned())),
        };

        let category = match self.category.as_deref() {
            Some(name) => C::parse(name)?,
            None => C::default(),
        };

        let description = match self.description.as_deref().map(str::trim) {
            Some(description) if description.chars().count() > MAX_DESCRIPTION_LENGTH => {
                return Err(Error::Validation(format!(
                    "Description cannot be more than {MAX_DESCRIPTION_LENGTH} characters"
                )));
            }
            Some("") | None => None,
            Some(description) => Some(description.to_owned()),
        };

        Ok(RecordDraft {
            title: title.to_owned(),
            amount,
            category,
            date: self.date.unwrap_or(default_date),
            description,
        })
    }
}
