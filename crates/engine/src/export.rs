//! CSV projection of the stored expenses.
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{EngineError, Expense, ResultEngine};

const HEADER: [&str; 4] = ["Title", "Amount", "Date", "Category"];

/// Text form of an amount: shortest round-trip digits, whole numbers keep a
/// trailing `.0`.
fn amount_text(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 {
        format!("{amount:.1}")
    } else {
        amount.to_string()
    }
}

/// Render `expenses` as comma separated rows preceded by [`HEADER`].
///
/// Every field is written with its text form and nothing is quoted, so a
/// comma inside a title or a category shows up as an extra column.
pub(crate) fn render(expenses: &[Expense]) -> ResultEngine<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    writer.write_record(HEADER)?;
    for expense in expenses {
        writer.write_record([
            expense.title.as_str(),
            amount_text(expense.amount).as_str(),
            expense.date.to_string().as_str(),
            expense.category.as_str(),
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.error().to_string()))?;
    String::from_utf8(data).map_err(|err| EngineError::Export(err.to_string()))
}
