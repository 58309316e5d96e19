use crate::input::InputError;
use crate::models::{EventError, LoginEvent};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// One row of the login history as it appears in the file
///
/// Columns are matched by header name; extra columns are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginRecord {
    login_id: Option<String>,
    user_id: Option<String>,
    country: Option<String>,
    login_result: Option<String>,
    timestamp: Option<String>,
}

impl LoginRecord {
    fn into_event(self) -> Result<LoginEvent, EventError> {
        let login_id = required(self.login_id, "login_id")?;
        let user_id = required(self.user_id, "user_id")?;
        let country = required(self.country, "country")?;
        let login_result = required(self.login_result, "login_result")?;
        let timestamp = required(self.timestamp, "timestamp")?;

        LoginEvent::parse(&login_id, &user_id, &country, &login_result, &timestamp)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, EventError> {
    value.ok_or(EventError::MissingField(field))
}

/// Reads login events from a CSV file with a header row
pub struct CsvLoginSource {
    file_path: PathBuf,
}

impl CsvLoginSource {
    pub fn new(file_path: PathBuf) -> Self {
        CsvLoginSource { file_path }
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    /// Read every event in the file, in file order
    ///
    /// Aborts on the first malformed record; nothing is returned for a
    /// partially valid file.
    pub fn read_events(&self) -> Result<Vec<LoginEvent>, InputError> {
        let file = File::open(&self.file_path).map_err(|source| InputError::Open {
            path: self.file_path.display().to_string(),
            source,
        })?;
        let events = Self::from_reader(file)?;
        log::info!("Loaded {} event(s) from {:?}", events.len(), self.file_path);
        Ok(events)
    }

    /// Read events from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LoginEvent>, InputError> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut events = Vec::new();

        for (index, result) in reader.deserialize::<LoginRecord>().enumerate() {
            let row = index + 1;
            let record = result?;
            let event = record
                .into_event()
                .map_err(|source| InputError::InvalidRecord { row, source })?;
            events.push(event);
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginResult;
    use std::io::Write;

    const SAMPLE: &str = "\
login_id,user_id,country,login_result,timestamp
1,alice,US,success,2025-01-01 09:15:00
2,bob,FR,fail,2025-01-01 10:00:00
";

    #[test]
    fn test_parse_rows() {
        let events = CsvLoginSource::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].login_id, "1");
        assert_eq!(events[0].user_id, "alice");
        assert_eq!(events[0].raw_timestamp, "2025-01-01 09:15:00");
        assert_eq!(events[1].country, "FR");
        assert_eq!(events[1].login_result, LoginResult::Fail);
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let data = "timestamp,device,login_result,country,user_id,login_id\n\
                    2025-01-01 09:15:00,phone,locked,US,alice,7\n";
        let events = CsvLoginSource::from_reader(data.as_bytes()).unwrap();
        assert_eq!(events[0].login_id, "7");
        assert_eq!(events[0].login_result, LoginResult::Other("locked".to_string()));
    }

    #[test]
    fn test_fields_kept_verbatim() {
        let data = "login_id,user_id,country,login_result,timestamp\n\
                    1,alice, US ,success,2025-01-01 09:00:00\n\
                    2,alice,US,success,2025-01-01 10:00:00\n";
        let events = CsvLoginSource::from_reader(data.as_bytes()).unwrap();
        assert_eq!(events[0].country, " US ");
        assert_eq!(events[1].country, "US");

        // Padded and unpadded codes are different countries
        let flagged = crate::detection::detect(&events);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].login_id, "2");
        assert_eq!(flagged[0].reasons[0], "New country for this user: US (previous:  US )");
    }

    #[test]
    fn test_header_only() {
        let data = "login_id,user_id,country,login_result,timestamp\n";
        assert!(CsvLoginSource::from_reader(data.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "login_id,user_id,login_result,timestamp\n1,alice,success,2025-01-01 09:15:00\n";
        let err = CsvLoginSource::from_reader(data.as_bytes()).unwrap_err();
        match err {
            InputError::InvalidRecord { row, source } => {
                assert_eq!(row, 1);
                assert!(matches!(source, EventError::MissingField("country")));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_timestamp_aborts_run() {
        let data = "login_id,user_id,country,login_result,timestamp\n\
                    1,alice,US,success,2025-01-01 09:15:00\n\
                    2,alice,US,success,yesterday\n\
                    3,alice,US,success,2025-01-01 11:00:00\n";
        let err = CsvLoginSource::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::InvalidRecord { row: 2, .. }));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = CsvLoginSource::new(file.path().to_path_buf());
        let events = source.read_events().unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let source = CsvLoginSource::new(PathBuf::from("/nonexistent/logins.csv"));
        assert!(matches!(source.read_events(), Err(InputError::Open { .. })));
    }
}
