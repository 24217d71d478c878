use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};
use crate::holdings::holdings_model::Holding;
use crate::holdings::holdings_traits::HoldingsSourceTrait;
use crate::utils::parse::parse_decimal_lenient;

const MANDATORY_COLUMNS: [&str; 4] = ["ticker", "quantity", "cost_basis", "stop_loss"];

/// Holdings source backed by an operator-maintained CSV file with columns
/// `ticker,quantity,cost_basis,stop_loss`.
pub struct CsvHoldingsSource {
    path: PathBuf,
}

impl CsvHoldingsSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl HoldingsSourceTrait for CsvHoldingsSource {
    fn get_holdings(&self) -> Result<Vec<Holding>> {
        if !self.path.exists() {
            return Err(Error::MissingData(format!(
                "holdings table not found at {}",
                self.path.display()
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let missing: Vec<&str> = MANDATORY_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == col))
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingData(format!(
                "holdings table {} is missing columns: {}",
                self.path.display(),
                missing.join(", ")
            )));
        }
        let idx = |name: &str| headers.iter().position(|h| h == name).unwrap_or(usize::MAX);
        let (ticker_idx, quantity_idx, cost_idx, stop_idx) = (
            idx("ticker"),
            idx("quantity"),
            idx("cost_basis"),
            idx("stop_loss"),
        );

        let mut holdings = Vec::new();
        for row in reader.records() {
            let row = row?;
            let ticker = row.get(ticker_idx).unwrap_or("").trim().to_string();
            if ticker.is_empty() {
                continue;
            }

            let mut holding = Holding {
                ticker,
                quantity: parse_decimal_lenient(row.get(quantity_idx).unwrap_or("")),
                cost_basis: parse_decimal_lenient(row.get(cost_idx).unwrap_or("")),
                stop_loss: match row.get(stop_idx).unwrap_or("").trim() {
                    "" => None,
                    s => Some(s.to_string()),
                },
            };
            if holding.is_cash() {
                // The cash line is bookkeeping: unit cost 1.0, quantity defaults to 0.
                holding.cost_basis = Some(Decimal::ONE);
                holding.quantity = Some(holding.quantity.unwrap_or(dec!(0)));
            }
            holdings.push(holding);
        }

        debug!(
            "Loaded {} holdings from {}",
            holdings.len(),
            self.path.display()
        );
        Ok(holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvHoldingsSource::new(dir.path().join("nope.csv"));
        assert!(matches!(
            source.get_holdings(),
            Err(Error::MissingData(_))
        ));
    }

    #[test]
    fn missing_mandatory_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holdings.csv");
        fs::write(&path, "ticker,quantity\nAAA,10\n").unwrap();
        let err = CsvHoldingsSource::new(&path).get_holdings().unwrap_err();
        match err {
            Error::MissingData(msg) => {
                assert!(msg.contains("cost_basis"));
                assert!(msg.contains("stop_loss"));
            }
            other => panic!("expected MissingData, got {other:?}"),
        }
    }

    #[test]
    fn cash_line_is_pinned_to_unit_cost() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holdings.csv");
        fs::write(
            &path,
            "ticker,quantity,cost_basis,stop_loss\nCASH,,42,\nAAA,10,100,10%\n",
        )
        .unwrap();
        let holdings = CsvHoldingsSource::new(&path).get_holdings().unwrap();

        let cash = &holdings[0];
        assert_eq!(cash.quantity, Some(dec!(0)));
        assert_eq!(cash.cost_basis, Some(Decimal::ONE));

        let aaa = &holdings[1];
        assert_eq!(aaa.quantity, Some(dec!(10)));
        assert_eq!(aaa.stop_loss.as_deref(), Some("10%"));
    }
}
