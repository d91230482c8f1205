use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};

// ---------------------------------------------------------------------------
// CardRecord: One row of the collection spreadsheet
// ---------------------------------------------------------------------------

/// A single owned card as read from the source spreadsheet.
///
/// Profit is not a stored field: [`CardRecord::profit`] derives it from the
/// two price columns every time, so it can never disagree with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub card_name: String,
    pub set_name: String,
    pub set_code: String,
    pub card_number: String,
    pub language: String,
    pub date_bought: NaiveDate,
    pub price_bought: Decimal,
    /// Average market value (the "AVG" column).
    pub avg_market_value: Decimal,
}

impl CardRecord {
    /// `avg_market_value - price_bought`.
    pub fn profit(&self) -> Decimal {
        self.avg_market_value.saturating_sub(self.price_bought)
    }
}

impl Serialize for CardRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CardRecord", 9)?;
        s.serialize_field("cardName", &self.card_name)?;
        s.serialize_field("setName", &self.set_name)?;
        s.serialize_field("setCode", &self.set_code)?;
        s.serialize_field("cardNumber", &self.card_number)?;
        s.serialize_field("language", &self.language)?;
        s.serialize_field("dateBought", &self.date_bought)?;
        s.serialize_field("priceBought", &self.price_bought)?;
        s.serialize_field("avg", &self.avg_market_value)?;
        s.serialize_field("profit", &self.profit())?;
        s.end()
    }
}
