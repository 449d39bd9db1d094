use super::{Params, Settings, Solver};
use crate::algebra::*;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};
use thiserror::Error;

/// Error type returned by JSON problem read/write
#[derive(Error, Debug)]
pub enum JsonError {
    #[error("json file i/o failed")]
    Io(#[from] io::Error),
    #[error("json (de)serialization failed")]
    Json(#[from] serde_json::Error),
}

// A problem instance as provided by the user, i.e. no internal types

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonProblemData<T: FloatT> {
    pub params: Params<T>,
    pub settings: Settings<T>,
}

impl<T> Solver<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Save the current parameters and settings as JSON
    pub fn write_to_file(&self, file: &mut File) -> Result<(), JsonError> {
        let mut json_data = JsonProblemData {
            params: self.params.clone(),
            settings: self.settings.clone(),
        };

        // sanitize settings to remove values that
        // can't be serialized, i.e. infs
        sanitize_settings(&mut json_data.settings);

        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Create a solver from a file written by [`write_to_file`](Self::write_to_file)
    pub fn read_from_file(file: &mut File) -> Result<Self, JsonError> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let mut json_data: JsonProblemData<T> = serde_json::from_str(&buffer)?;

        // restore sanitized settings to their (likely) original values
        desanitize_settings(&mut json_data.settings);

        Ok(Self::new(json_data.params, json_data.settings))
    }
}

fn sanitize_settings<T: FloatT>(settings: &mut Settings<T>) {
    if settings.time_limit == f64::INFINITY {
        settings.time_limit = f64::MAX;
    }
}

fn desanitize_settings<T: FloatT>(settings: &mut Settings<T>) {
    if settings.time_limit == f64::MAX {
        settings.time_limit = f64::INFINITY;
    }
}

#[test]
fn test_sanitize_settings() {
    let mut settings = Settings::<f64>::default();
    sanitize_settings(&mut settings);
    assert_eq!(settings.time_limit, f64::MAX);
    assert!(serde_json::to_string(&settings).is_ok());

    desanitize_settings(&mut settings);
    assert_eq!(settings.time_limit, f64::INFINITY);

    // finite limits pass through untouched
    let mut settings = Settings::<f64> {
        time_limit: 10.0,
        ..Settings::default()
    };
    sanitize_settings(&mut settings);
    desanitize_settings(&mut settings);
    assert_eq!(settings.time_limit, 10.0);
}
