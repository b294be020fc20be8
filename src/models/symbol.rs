use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::OptionType;

/// Decoded OCC option symbol, e.g. `AAPL241220P00150000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    pub underlying: String,
    pub expiration: NaiveDate,
    pub option_type: OptionType,
    pub strike: Decimal,
}

#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("option symbol too short: {0}")]
    TooShort(String),

    #[error("invalid underlying in option symbol: {0}")]
    InvalidUnderlying(String),

    #[error("invalid expiration date in option symbol: {0}")]
    InvalidExpiration(String),

    #[error("invalid option type {1:?} in symbol: {0}")]
    InvalidType(String, char),

    #[error("invalid strike in option symbol: {0}")]
    InvalidStrike(String),
}

/// Parse an OCC symbol into underlying, expiration, type and strike.
///
/// Layout, right-aligned: 8-digit strike in thousandths of a dollar,
/// one `C`/`P` type character, 6-digit `YYMMDD` expiration, and whatever
/// remains on the left is the underlying root (1 to 6 characters).
pub fn parse_option_symbol(symbol: &str) -> Result<ParsedOption, SymbolError> {
    // underlying(>=1) + date(6) + type(1) + strike(8)
    if symbol.len() < 16 || !symbol.is_ascii() {
        return Err(SymbolError::TooShort(symbol.to_string()));
    }

    let (rest, strike_raw) = symbol.split_at(symbol.len() - 8);
    let (rest, type_raw) = rest.split_at(rest.len() - 1);
    let (underlying, date_raw) = rest.split_at(rest.len() - 6);

    if underlying.is_empty() || !underlying.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SymbolError::InvalidUnderlying(symbol.to_string()));
    }

    let expiration = NaiveDate::parse_from_str(date_raw, "%y%m%d")
        .map_err(|_| SymbolError::InvalidExpiration(symbol.to_string()))?;

    let option_type = match type_raw {
        "C" => OptionType::Call,
        "P" => OptionType::Put,
        other => {
            let c = other.chars().next().unwrap_or('?');
            return Err(SymbolError::InvalidType(symbol.to_string(), c));
        }
    };

    let thousandths: i64 = strike_raw
        .parse()
        .map_err(|_| SymbolError::InvalidStrike(symbol.to_string()))?;
    let strike = Decimal::new(thousandths, 3);

    Ok(ParsedOption {
        underlying: underlying.to_string(),
        expiration,
        option_type,
        strike,
    })
}
