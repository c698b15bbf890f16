use crate::indicator::UnknownKey;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// File format for the export endpoint.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    /// Tab-separated table served with the spreadsheet MIME type.
    Excel,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Excel => "application/vnd.ms-excel",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xls",
        }
    }

    /// Field delimiter for the tabular formats.
    pub fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Excel => b'\t',
            _ => b',',
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
        };
        f.write_str(s)
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xls" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(UnknownKey {
                kind: "export format",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_excel_is_tab_separated() {
        assert_eq!(ExportFormat::Excel.delimiter(), b'\t');
        assert_eq!(ExportFormat::Excel.extension(), "xls");
        assert_eq!(ExportFormat::Csv.delimiter(), b',');
    }
}
