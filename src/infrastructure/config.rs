use std::path::PathBuf;

use clap::Parser;

use super::persistence::{FileRepository, RepositoryError};
use super::seed::default_users;
use crate::domain::{PageSize, UserRecord};

/// Startup options.
#[derive(Debug, Clone, Parser)]
#[command(name = "usertable", version, about = "Terminal admin table for user records")]
pub struct Settings {
    /// JSON file with the initial users; the built-in sample set is used when omitted
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Rows per page (5, 10 or 25)
    #[arg(long, default_value = "10", value_parser = parse_page_size)]
    pub page_size: PageSize,

    /// Write logs to this file; logging is off otherwise since the terminal is in use
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "usertable=debug"
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Settings {
    pub fn load_rows(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        match &self.seed {
            Some(path) => FileRepository::load_users(path),
            None => Ok(default_users()),
        }
    }
}

fn parse_page_size(value: &str) -> Result<PageSize, String> {
    let rows: usize = value.parse().map_err(|_| format!("not a number: {value}"))?;
    PageSize::from_rows(rows).ok_or_else(|| format!("page size must be 5, 10 or 25, got {rows}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["usertable"]).unwrap();
        assert_eq!(settings.page_size, PageSize::Ten);
        assert!(settings.seed.is_none());
        assert!(settings.log_file.is_none());
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.load_rows().unwrap().len(), 14);
    }

    #[test]
    fn test_page_size_flag() {
        let settings = Settings::try_parse_from(["usertable", "--page-size", "25"]).unwrap();
        assert_eq!(settings.page_size, PageSize::TwentyFive);
        assert!(Settings::try_parse_from(["usertable", "--page-size", "7"]).is_err());
        assert!(Settings::try_parse_from(["usertable", "--page-size", "ten"]).is_err());
    }

    #[test]
    fn test_missing_seed_file_is_an_error() {
        let settings =
            Settings::try_parse_from(["usertable", "--seed", "/definitely/not/here.json"]).unwrap();
        assert!(settings.load_rows().is_err());
    }
}
